//! Quote pricing.

mod totals;

pub use totals::{
    calculate_totals, Discount, DiscountKind, QuoteItem, QuoteTotals, TotalsWarning,
};
