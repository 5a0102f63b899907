//! Quote totals.
//!
//! Totals are recomputed from the line items every time; nothing is patched
//! incrementally. The result is what a quote editor displays and what the
//! PDF export prints.
//!
//! ```text
//! subtotal  = sum of line subtotals
//! discount  = subtotal * pct / 100   (percentage)
//!           | value                  (fixed)
//! taxable   = subtotal - discount    (may go negative)
//! tax       = taxable * rate / 100   (only when tax applies)
//! total     = taxable + tax
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// One priced line of a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteItem {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    /// `quantity * unit_price`, as stored with the line.
    pub subtotal: f64,
}

impl QuoteItem {
    /// Creates a line with its subtotal computed.
    pub fn new(description: impl Into<String>, quantity: f64, unit_price: f64) -> Self {
        QuoteItem {
            description: description.into(),
            quantity,
            unit_price,
            subtotal: quantity * unit_price,
        }
    }

    /// Returns `true` if the stored subtotal matches quantity times price
    /// to within a hundredth of a cent.
    pub fn is_consistent(&self) -> bool {
        (self.subtotal - self.quantity * self.unit_price).abs() < 1e-4
    }
}

/// How a discount value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    /// Percent of the subtotal.
    Percentage,
    /// Flat currency amount.
    Fixed,
}

/// A discount applied to the whole quote.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    #[serde(rename = "type")]
    pub kind: DiscountKind,
    pub value: f64,
}

impl Discount {
    pub fn percentage(value: f64) -> Self {
        Discount {
            kind: DiscountKind::Percentage,
            value,
        }
    }

    pub fn fixed(value: f64) -> Self {
        Discount {
            kind: DiscountKind::Fixed,
            value,
        }
    }

    /// The currency amount this discount takes off `subtotal`.
    pub fn amount(&self, subtotal: f64) -> f64 {
        match self.kind {
            DiscountKind::Percentage => subtotal * self.value / 100.0,
            DiscountKind::Fixed => self.value,
        }
    }
}

/// Conditions worth surfacing alongside computed totals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TotalsWarning {
    /// The discount is larger than the subtotal, so the taxable amount and
    /// the total are negative.
    DiscountExceedsSubtotal { discount: f64, subtotal: f64 },
}

impl fmt::Display for TotalsWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TotalsWarning::DiscountExceedsSubtotal { discount, subtotal } => write!(
                f,
                "discount {discount:.2} exceeds subtotal {subtotal:.2}; total is negative"
            ),
        }
    }
}

/// Computed quote totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteTotals {
    pub subtotal: f64,
    pub discount_amount: f64,
    pub tax_amount: f64,
    pub total: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<TotalsWarning>,
}

impl QuoteTotals {
    /// Subtotal after discount, before tax.
    pub fn taxable(&self) -> f64 {
        self.subtotal - self.discount_amount
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Computes totals for a set of line items.
///
/// Line subtotals are summed as stored. The discount is taken before tax and
/// the result is not floored at zero: an over-discounted quote has a
/// negative total and carries [`TotalsWarning::DiscountExceedsSubtotal`].
///
/// # Example
///
/// ```
/// use fieldops::quote::{calculate_totals, Discount, QuoteItem};
///
/// let items = [QuoteItem::new("Service call", 1.0, 100.0)];
/// let totals = calculate_totals(&items, true, 10.0, Some(Discount::percentage(10.0)));
///
/// assert_eq!(totals.subtotal, 100.0);
/// assert_eq!(totals.discount_amount, 10.0);
/// assert_eq!(totals.tax_amount, 9.0);
/// assert_eq!(totals.total, 99.0);
/// ```
pub fn calculate_totals(
    items: &[QuoteItem],
    apply_tax: bool,
    tax_rate: f64,
    discount: Option<Discount>,
) -> QuoteTotals {
    let subtotal: f64 = items.iter().map(|item| item.subtotal).sum();
    let discount_amount = discount.map_or(0.0, |d| d.amount(subtotal));
    let taxable = subtotal - discount_amount;
    let tax_amount = if apply_tax {
        taxable * tax_rate / 100.0
    } else {
        0.0
    };

    let mut warnings = Vec::new();
    if discount_amount > subtotal {
        tracing::debug!(discount_amount, subtotal, "discount exceeds subtotal");
        warnings.push(TotalsWarning::DiscountExceedsSubtotal {
            discount: discount_amount,
            subtotal,
        });
    }

    QuoteTotals {
        subtotal,
        discount_amount,
        tax_amount,
        total: taxable + tax_amount,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn percentage_discount_then_tax() {
        let items = [QuoteItem::new("Service call", 1.0, 100.0)];
        let totals = calculate_totals(&items, true, 10.0, Some(Discount::percentage(10.0)));

        assert_eq!(totals.subtotal, 100.0);
        assert_eq!(totals.discount_amount, 10.0);
        assert_eq!(totals.tax_amount, 9.0);
        assert_eq!(totals.total, 99.0);
        assert!(!totals.has_warnings());
    }

    #[test]
    fn fixed_discount() {
        let items = [
            QuoteItem::new("Copper pipe", 4.0, 12.5),
            QuoteItem::new("Labour", 2.0, 75.0),
        ];
        let totals = calculate_totals(&items, true, 8.0, Some(Discount::fixed(20.0)));

        assert_eq!(totals.subtotal, 200.0);
        assert_eq!(totals.discount_amount, 20.0);
        assert!(approx(totals.tax_amount, 14.4));
        assert!(approx(totals.total, 194.4));
    }

    #[test]
    fn tax_ignored_when_not_applied() {
        let items = [QuoteItem::new("Inspection", 1.0, 250.0)];
        let totals = calculate_totals(&items, false, 20.0, None);

        assert_eq!(totals.tax_amount, 0.0);
        assert_eq!(totals.total, 250.0);
    }

    #[test]
    fn empty_quote_is_zero() {
        let totals = calculate_totals(&[], true, 10.0, Some(Discount::percentage(15.0)));
        assert_eq!(totals.subtotal, 0.0);
        assert_eq!(totals.discount_amount, 0.0);
        assert_eq!(totals.total, 0.0);
        assert!(!totals.has_warnings());
    }

    #[test]
    fn stored_line_subtotals_are_trusted() {
        let mut item = QuoteItem::new("Filter", 3.0, 10.0);
        item.subtotal = 25.0;
        assert!(!item.is_consistent());

        let totals = calculate_totals(&[item], false, 0.0, None);
        assert_eq!(totals.subtotal, 25.0);
    }

    #[test]
    fn over_discount_goes_negative_with_warning() {
        let items = [QuoteItem::new("Small job", 1.0, 40.0)];
        let totals = calculate_totals(&items, true, 10.0, Some(Discount::fixed(50.0)));

        assert_eq!(totals.taxable(), -10.0);
        assert_eq!(totals.tax_amount, -1.0);
        assert_eq!(totals.total, -11.0);
        assert_eq!(
            totals.warnings,
            vec![TotalsWarning::DiscountExceedsSubtotal {
                discount: 50.0,
                subtotal: 40.0
            }]
        );
        assert_eq!(
            totals.warnings[0].to_string(),
            "discount 50.00 exceeds subtotal 40.00; total is negative"
        );
    }

    #[test]
    fn items_are_not_mutated() {
        let items = vec![QuoteItem::new("Valve", 2.0, 30.0)];
        let before = items.clone();
        let _ = calculate_totals(&items, true, 5.0, Some(Discount::percentage(50.0)));
        assert_eq!(items, before);
    }

    #[test]
    fn discount_deserializes_from_backend_shape() {
        let discount: Discount =
            serde_json::from_str(r#"{ "type": "percentage", "value": 12.5 }"#).unwrap();
        assert_eq!(discount, Discount::percentage(12.5));
        assert_eq!(discount.amount(200.0), 25.0);
    }
}
