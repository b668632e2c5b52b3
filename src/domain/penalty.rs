use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A configured overdue-penalty tier. `rate` is a percentage applied to the
/// statement's scheduled amount. An absent `days_overdue_to` means the tier
/// is open-ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenaltyRate {
    pub penalty_rate_id: u32,
    pub product_type: String,
    pub product_subtype: String,
    #[serde(default)]
    pub days_overdue_from: i64,
    pub days_overdue_to: Option<i64>,
    pub rate: Decimal,
}

impl PenaltyRate {
    /// Whether this tier applies to the given product and overdue age.
    /// Tiers are not checked for overlap; the caller takes the first match
    /// in table iteration order.
    pub fn matches(&self, product_type: &str, product_subtype: &str, days_overdue: i64) -> bool {
        self.product_type == product_type
            && self.product_subtype == product_subtype
            && days_overdue >= self.days_overdue_from
            && self
                .days_overdue_to
                .is_none_or(|to| days_overdue <= to)
    }
}
