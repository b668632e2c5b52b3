use crate::error::LedgerError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A saved payee reference. `account_number` points at an external bank
/// account, an internal loan (`loan_account_number`), or an internal card
/// (`card_number`) depending on `beneficiary_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beneficiary {
    pub beneficiary_id: u32,
    pub customer_id: u32,
    pub name: String,
    pub swift_code: Option<String>,
    pub beneficiary_type: BeneficiaryType,
    pub account_number: String,
    pub added_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BeneficiaryType {
    BankAccount,
    LoanAccount,
    Card,
}

impl FromStr for BeneficiaryType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BANK_ACCOUNT" => Ok(Self::BankAccount),
            "LOAN_ACCOUNT" => Ok(Self::LoanAccount),
            "CARD" => Ok(Self::Card),
            other => Err(LedgerError::invalid_argument(format!(
                "'beneficiary_type' must be one of: BANK_ACCOUNT, LOAN_ACCOUNT, CARD (got '{other}')"
            ))),
        }
    }
}
