use crate::error::LedgerError;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A payment card. For CREDIT and PREPAID cards, `balance` is the
/// outstanding amount and must stay within `credit_limit`; DEBIT cards
/// carry purchases without a limit check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub card_id: u32,
    pub customer_id: u32,
    #[serde(rename = "type")]
    pub card_type: CardType,
    pub card_number: String,
    pub expiry_date: NaiveDate,
    pub issued_date: NaiveDate,
    pub status: CardStatus,
    pub balance: Decimal,
    pub credit_limit: Decimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardType {
    Debit,
    Credit,
    Prepaid,
}

impl CardType {
    /// Whether purchases on this card are constrained by its credit limit.
    pub fn enforces_limit(self) -> bool {
        matches!(self, Self::Credit | Self::Prepaid)
    }
}

impl FromStr for CardType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DEBIT" => Ok(Self::Debit),
            "CREDIT" => Ok(Self::Credit),
            "PREPAID" => Ok(Self::Prepaid),
            other => Err(LedgerError::invalid_argument(format!(
                "'card_type' must be one of: DEBIT, CREDIT, PREPAID (got '{other}')"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardStatus {
    Active,
    Blocked,
    Expired,
}

impl FromStr for CardStatus {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(Self::Active),
            "BLOCKED" => Ok(Self::Blocked),
            "EXPIRED" => Ok(Self::Expired),
            other => Err(LedgerError::invalid_argument(format!(
                "'status' must be one of: ACTIVE, BLOCKED, EXPIRED (got '{other}')"
            ))),
        }
    }
}
