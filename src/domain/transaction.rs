use crate::error::LedgerError;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An immutable ledger entry. Exactly one of `account_id`, `card_id`,
/// `loan_id` anchors the movement depending on its type; the others stay
/// null. Appended by every balance-mutating operation, never patched except
/// for `card_tx_status` when a card statement bills the purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: u32,
    pub account_id: Option<u32>,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    pub channel: String,
    pub amount: Decimal,
    pub occurred_at: NaiveDateTime,
    pub beneficiary_id: Option<u32>,
    pub card_id: Option<u32>,
    #[serde(default)]
    pub loan_id: Option<u32>,
    pub merchant: Option<String>,
    pub card_tx_status: Option<CardTxStatus>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
    Transfer,
    Payment,
    CardPurchase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardTxStatus {
    Unbilled,
    Billed,
}

/// Channel of a card purchase. Deposits, withdrawals, and payments accept
/// free-form channel strings; only purchases are restricted to this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Channel {
    Branch,
    Atm,
    Online,
    Mobile,
    #[default]
    Pos,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Branch => "BRANCH",
            Self::Atm => "ATM",
            Self::Online => "ONLINE",
            Self::Mobile => "MOBILE",
            Self::Pos => "POS",
        };
        f.write_str(s)
    }
}

impl FromStr for Channel {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BRANCH" => Ok(Self::Branch),
            "ATM" => Ok(Self::Atm),
            "ONLINE" => Ok(Self::Online),
            "MOBILE" => Ok(Self::Mobile),
            "POS" => Ok(Self::Pos),
            other => Err(LedgerError::invalid_argument(format!(
                "'channel' must be one of: BRANCH, ATM, ONLINE, MOBILE, POS (got '{other}')"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_deserializes_without_loan_id() {
        let json = r#"{
            "transaction_id": 7,
            "account_id": 1,
            "type": "DEPOSIT",
            "channel": "BRANCH",
            "amount": 250,
            "occurred_at": "2024-01-05T09:30:00",
            "beneficiary_id": null,
            "card_id": null,
            "merchant": null,
            "card_tx_status": null,
            "created_at": "2024-01-05T09:30:00"
        }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.tx_type, TransactionType::Deposit);
        assert_eq!(tx.loan_id, None);
    }

    #[test]
    fn channel_parse_and_display_round_trip() {
        for raw in ["BRANCH", "ATM", "ONLINE", "MOBILE", "POS"] {
            let channel: Channel = raw.parse().unwrap();
            assert_eq!(channel.to_string(), raw);
        }
        assert!("WIRE".parse::<Channel>().is_err());
    }
}
