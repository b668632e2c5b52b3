use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A generated billing statement for one 30-day card cycle.
///
/// Periods for the same card are contiguous: each statement starts one day
/// after the previous one ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardStatement {
    pub statement_id: u32,
    pub card_id: u32,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub total_due: Decimal,
    pub minimum_due: Decimal,
    pub payment_due_date: NaiveDate,
    pub late_fee_amount: Decimal,
    pub penalty_rate_id: Option<u32>,
    pub status: CardStatementStatus,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardStatementStatus {
    Open,
    Paid,
    Overdue,
}

/// A generated billing statement for one 30-day loan cycle. Carries the
/// penalty fee resolved at generation time when the due date has already
/// passed without a qualifying payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanStatement {
    pub statement_id: u32,
    pub loan_id: u32,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub due_date: NaiveDate,
    pub scheduled_amount: Decimal,
    pub late_fee_amount: Decimal,
    pub penalty_rate_id: Option<u32>,
    pub status: LoanStatementStatus,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanStatementStatus {
    Pending,
    Paid,
    Overdue,
}
