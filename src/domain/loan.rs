use crate::error::LedgerError;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A fixed-payment loan. `interest_rate` is the annual rate in percent;
/// `tenure` is the number of monthly periods. `end_date` is set only when
/// the loan transitions to CLOSED.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub loan_id: u32,
    pub customer_id: u32,
    pub branch_id: u32,
    pub loan_account_number: String,
    #[serde(rename = "type")]
    pub loan_type: String,
    pub principal_amount: Decimal,
    pub interest_rate: Decimal,
    pub tenure: u32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub status: LoanStatus,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanStatus {
    Active,
    Closed,
    Defaulted,
}

impl FromStr for LoanStatus {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(Self::Active),
            "CLOSED" => Ok(Self::Closed),
            "DEFAULTED" => Ok(Self::Defaulted),
            other => Err(LedgerError::invalid_argument(format!(
                "'status' must be one of: ACTIVE, CLOSED, DEFAULTED (got '{other}')"
            ))),
        }
    }
}
