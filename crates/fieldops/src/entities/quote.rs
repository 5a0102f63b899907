use chrono::{DateTime, NaiveDate, Utc};
use fieldops_seeker::{Number, Seekable, Timestamp, Value};
use serde::{Deserialize, Serialize};

use super::{nested_path, ClientRef, Entity, EntityKind};
use crate::quote::{calculate_totals, Discount, QuoteItem, QuoteTotals};

string_enum! {
    /// Where a quote is in its approval cycle.
    QuoteStatus {
        Draft => ("draft", "Draft"),
        Sent => ("sent", "Sent"),
        Accepted => ("accepted", "Accepted"),
        Rejected => ("rejected", "Rejected"),
        Expired => ("expired", "Expired"),
    }
}

/// A priced offer to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: i64,
    pub quote_number: u32,
    pub title: String,
    pub client: ClientRef,
    pub status: QuoteStatus,
    #[serde(default)]
    pub items: Vec<QuoteItem>,
    #[serde(default)]
    pub apply_tax: bool,
    #[serde(default)]
    pub tax_rate: f64,
    #[serde(default)]
    pub discount: Option<Discount>,
    #[serde(default)]
    pub valid_until: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Quote {
    /// Totals computed from this quote's items, tax and discount settings.
    pub fn totals(&self) -> QuoteTotals {
        calculate_totals(&self.items, self.apply_tax, self.tax_rate, self.discount)
    }
}

impl Seekable for Quote {
    fn field_value(&self, field: &str) -> Value<'_> {
        if let Some((head, rest)) = nested_path(field) {
            return match head {
                "client" => self.client.field_value(rest),
                _ => Value::None,
            };
        }
        match field {
            "id" => Value::Number(Number::I64(self.id)),
            "quote_number" => Value::Number(Number::from(self.quote_number)),
            "title" => Value::String(&self.title),
            "status" => Value::String(self.status.as_str()),
            "apply_tax" => Value::Bool(self.apply_tax),
            "total" => Value::Number(Number::F64(self.totals().total)),
            "valid_until" => self.valid_until.map(Timestamp::from).into(),
            "created_at" => Timestamp::from(&self.created_at).into(),
            _ => Value::None,
        }
    }
}

impl Entity for Quote {
    const KIND: EntityKind = EntityKind::Quotes;

    fn id(&self) -> i64 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn quote() -> Quote {
        Quote {
            id: 1,
            quote_number: 1042,
            title: "Boiler replacement".into(),
            client: ClientRef::new(1, "Acme Plumbing"),
            status: QuoteStatus::Sent,
            items: vec![
                QuoteItem::new("Boiler", 1.0, 1800.0),
                QuoteItem::new("Labour", 8.0, 25.0),
            ],
            apply_tax: true,
            tax_rate: 10.0,
            discount: Some(Discount::fixed(100.0)),
            valid_until: None,
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn totals_use_quote_settings() {
        let totals = quote().totals();
        assert_eq!(totals.subtotal, 2000.0);
        assert_eq!(totals.discount_amount, 100.0);
        assert_eq!(totals.tax_amount, 190.0);
        assert_eq!(totals.total, 2090.0);
    }

    #[test]
    fn quote_number_is_searchable() {
        let q = quote();
        let search = q.field_value("quote_number").search_form();
        assert_eq!(search.as_deref(), Some("1042"));
        assert_eq!(q.field_value("total"), Value::Number(Number::F64(2090.0)));
    }
}
