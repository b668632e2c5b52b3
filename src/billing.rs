use crate::amortization::fixed_monthly_payment;
use crate::clock::{Clock, SystemClock};
use crate::dataset::Dataset;
use crate::domain::money::round2;
use crate::domain::{
    CardStatement, CardStatementStatus, CardTxStatus, LoanStatement, LoanStatementStatus,
};
use crate::error::{LedgerError, Result};
use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const CYCLE_DAYS: i64 = 29; // inclusive span of a 30-day billing cycle
const GRACE_DAYS: i64 = 10;

/// Produces periodic billing statements for cards and loans.
///
/// Cycles are contiguous: the next period starts one day after the latest
/// existing statement ends, seeded from the card's issue date or the loan's
/// start date when no statement exists yet.
pub struct StatementGenerator<C: Clock = SystemClock> {
    clock: C,
}

impl StatementGenerator {
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl Default for StatementGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn next_period(previous_end: Option<NaiveDate>, origin: NaiveDate) -> (NaiveDate, NaiveDate, NaiveDate) {
    let previous_end = previous_end.unwrap_or(origin - Duration::days(1));
    let period_start = previous_end + Duration::days(1);
    let period_end = period_start + Duration::days(CYCLE_DAYS);
    let due_date = period_end + Duration::days(GRACE_DAYS);
    (period_start, period_end, due_date)
}

impl<C: Clock> StatementGenerator<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Generates the next card statement: totals the period's transactions,
    /// marks each of them BILLED, and computes the 10% minimum due.
    pub fn generate_card_statement(&self, data: &mut Dataset, card_id: u32) -> Result<CardStatement> {
        let card = data
            .cards
            .get(card_id)
            .ok_or_else(|| LedgerError::not_found("Card", card_id))?;

        let previous_end = data
            .card_statements
            .values()
            .filter(|s| s.card_id == card_id)
            .map(|s| s.period_end)
            .max();
        let (period_start, period_end, payment_due_date) =
            next_period(previous_end, card.issued_date);

        let mut total_due = Decimal::ZERO;
        for tx in data.transactions.values_mut() {
            if tx.card_id == Some(card_id) {
                let day = tx.occurred_at.date();
                if period_start <= day && day <= period_end {
                    total_due += tx.amount;
                    tx.card_tx_status = Some(CardTxStatus::Billed);
                }
            }
        }
        let total_due = round2(total_due);
        let minimum_due = round2(total_due * dec!(0.10));

        let now = self.clock.now();
        let id = data.card_statements.next_id();
        let statement = CardStatement {
            statement_id: id,
            card_id,
            period_start,
            period_end,
            total_due,
            minimum_due,
            payment_due_date,
            late_fee_amount: Decimal::ZERO,
            penalty_rate_id: None,
            status: CardStatementStatus::Open,
            created_at: now,
        };
        data.card_statements.insert(id, statement.clone());
        Ok(statement)
    }

    /// Generates the next loan statement. When the due date has already
    /// passed without a qualifying payment, the first matching penalty tier
    /// (in table order) sets the late fee.
    pub fn generate_loan_statement(&self, data: &mut Dataset, loan_id: u32) -> Result<LoanStatement> {
        let loan = data
            .loans
            .get(loan_id)
            .ok_or_else(|| LedgerError::not_found("Loan", loan_id))?;

        let previous_end = data
            .loan_statements
            .values()
            .filter(|s| s.loan_id == loan_id)
            .map(|s| s.period_end)
            .max();
        let (period_start, period_end, due_date) = next_period(previous_end, loan.start_date);

        let scheduled_amount = round2(fixed_monthly_payment(
            loan.principal_amount,
            loan.interest_rate,
            loan.tenure,
        ));

        // Any transaction referencing the loan inside [period_start, due_date]
        // counts as payment for this cycle.
        let paid = data.transactions.values().any(|tx| {
            tx.loan_id == Some(loan_id) && {
                let day = tx.occurred_at.date();
                period_start <= day && day <= due_date
            }
        });

        let today = self.clock.today();
        let mut late_fee_amount = Decimal::ZERO;
        let mut penalty_rate_id = None;
        if due_date < today && !paid {
            let days_overdue = (today - due_date).num_days();
            if let Some(tier) = data
                .penalty_rates
                .values()
                .find(|tier| tier.matches("LOAN", &loan.loan_type, days_overdue))
            {
                late_fee_amount = round2(scheduled_amount * tier.rate / dec!(100));
                penalty_rate_id = Some(tier.penalty_rate_id);
            }
        }

        let now = self.clock.now();
        let id = data.loan_statements.next_id();
        let statement = LoanStatement {
            statement_id: id,
            loan_id,
            period_start,
            period_end,
            due_date,
            scheduled_amount,
            late_fee_amount,
            penalty_rate_id,
            status: LoanStatementStatus::Pending,
            created_at: now,
        };
        data.loan_statements.insert(id, statement.clone());
        Ok(statement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn first_period_starts_at_origin() {
        let (start, end, due) = next_period(None, date(2024, 1, 10));
        assert_eq!(start, date(2024, 1, 10));
        assert_eq!(end, date(2024, 2, 8));
        assert_eq!(due, date(2024, 2, 18));
    }

    #[test]
    fn subsequent_period_is_contiguous() {
        let (start, end, _) = next_period(Some(date(2024, 2, 8)), date(2024, 1, 10));
        assert_eq!(start, date(2024, 2, 9));
        assert_eq!(end, date(2024, 3, 9));
    }
}
