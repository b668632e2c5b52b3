use crate::error::LedgerError;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A customer deposit account.
///
/// `balance` is never allowed to go negative by a withdrawal, transfer, or
/// payment; deposits accept any amount, including zero and negative ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub account_id: u32,
    pub branch_id: u32,
    pub customer_id: u32,
    pub account_number: String,
    #[serde(rename = "type")]
    pub account_type: String,
    pub balance: Decimal,
    pub opened_date: NaiveDate,
    pub status: AccountStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Open,
    Closed,
    Frozen,
}

impl FromStr for AccountStatus {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPEN" => Ok(Self::Open),
            "CLOSED" => Ok(Self::Closed),
            "FROZEN" => Ok(Self::Frozen),
            other => Err(LedgerError::invalid_argument(format!(
                "'status' must be one of: OPEN, CLOSED, FROZEN (got '{other}')"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_allowed_set_only() {
        assert_eq!("OPEN".parse::<AccountStatus>().unwrap(), AccountStatus::Open);
        assert!("open".parse::<AccountStatus>().is_err());
        assert!("SUSPENDED".parse::<AccountStatus>().is_err());
    }
}
