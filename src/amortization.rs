use crate::dataset::Dataset;
use crate::domain::Loan;
use crate::domain::money::round2;
use crate::error::{LedgerError, Result};
use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// One row of an amortization schedule. All monetary fields are rounded to
/// 2 decimal places; `balance` is the remaining principal after the period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationPeriod {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub scheduled_amount: Decimal,
    pub principal: Decimal,
    pub interest: Decimal,
    pub balance: Decimal,
}

fn monthly_rate(annual_rate_percent: Decimal) -> Decimal {
    annual_rate_percent / dec!(1200)
}

/// The fixed monthly payment for a loan: `P·r·(1+r)^n / ((1+r)^n − 1)`,
/// falling back to straight-line `P / n` when the monthly rate is zero.
/// A non-positive tenure is treated as a single period.
pub fn fixed_monthly_payment(principal: Decimal, annual_rate_percent: Decimal, tenure: u32) -> Decimal {
    let n = tenure.max(1);
    let r = monthly_rate(annual_rate_percent);
    if r > Decimal::ZERO {
        let factor = (Decimal::ONE + r).powi(n as i64);
        principal * r * factor / (factor - Decimal::ONE)
    } else {
        principal / Decimal::from(n)
    }
}

fn first_of_next_month(date: NaiveDate) -> Result<NaiveDate> {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| LedgerError::InvalidDate(format!("period start {date} out of range")))
}

/// Computes the full amortization schedule for a loan.
///
/// Deterministic and side-effect free: the result depends only on the
/// loan's principal, annual rate, tenure, and start date. Each period ends
/// on the last calendar day of the month its start falls in; subsequent
/// periods begin on the first of the following month.
pub fn schedule(loan: &Loan) -> Result<Vec<AmortizationPeriod>> {
    let n = loan.tenure.max(1);
    let rate = monthly_rate(loan.interest_rate);
    let mut payment = fixed_monthly_payment(loan.principal_amount, loan.interest_rate, loan.tenure);

    let mut balance = loan.principal_amount;
    let mut period_start = loan.start_date;
    let mut periods = Vec::with_capacity(n as usize);

    for _ in 0..n {
        let interest = balance * rate;
        let mut principal_paid = payment - interest;
        // Final-period correction: never amortize past zero.
        if principal_paid > balance {
            principal_paid = balance;
            payment = principal_paid + interest;
        }
        balance -= principal_paid;

        let next_month = first_of_next_month(period_start)?;
        let period_end = next_month - Duration::days(1);

        periods.push(AmortizationPeriod {
            period_start,
            period_end,
            scheduled_amount: round2(payment),
            principal: round2(principal_paid),
            interest: round2(interest),
            balance: round2(balance),
        });

        period_start = next_month;
    }

    Ok(periods)
}

/// Dataset entry point: resolves the loan and computes its schedule.
pub fn amortization_schedule(data: &Dataset, loan_id: u32) -> Result<Vec<AmortizationPeriod>> {
    let loan = data
        .loans
        .get(loan_id)
        .ok_or_else(|| LedgerError::not_found("Loan", loan_id))?;
    schedule(loan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LoanStatus;
    use chrono::NaiveDateTime;

    fn loan(principal: Decimal, rate: Decimal, tenure: u32, start: NaiveDate) -> Loan {
        Loan {
            loan_id: 1,
            customer_id: 1,
            branch_id: 1,
            loan_account_number: "LOAN1".into(),
            loan_type: "PERSONAL".into(),
            principal_amount: principal,
            interest_rate: rate,
            tenure,
            start_date: start,
            end_date: None,
            status: LoanStatus::Active,
            created_at: NaiveDateTime::default(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn fixed_payment_standard_case() {
        // 1200 at 12% over 12 months amortizes at 106.62/month.
        let payment = fixed_monthly_payment(dec!(1200), dec!(12), 12);
        assert_eq!(round2(payment), dec!(106.62));
    }

    #[test]
    fn fixed_payment_zero_rate_is_straight_line() {
        assert_eq!(fixed_monthly_payment(dec!(1200), dec!(0), 12), dec!(100));
    }

    #[test]
    fn fixed_payment_treats_non_positive_tenure_as_one() {
        assert_eq!(fixed_monthly_payment(dec!(500), dec!(0), 0), dec!(500));
    }

    #[test]
    fn schedule_closes_to_zero_with_positive_rate() {
        let loan = loan(dec!(1200), dec!(12), 12, date(2024, 1, 15));
        let periods = schedule(&loan).unwrap();
        assert_eq!(periods.len(), 12);
        assert_eq!(periods.last().unwrap().balance, dec!(0));

        let principal_total: Decimal = periods.iter().map(|p| p.principal).sum();
        assert!((principal_total - dec!(1200)).abs() <= dec!(0.05));
    }

    #[test]
    fn schedule_closes_to_zero_with_zero_rate() {
        let loan = loan(dec!(1000), dec!(0), 12, date(2024, 1, 1));
        let periods = schedule(&loan).unwrap();
        assert_eq!(periods.len(), 12);
        assert_eq!(periods.last().unwrap().balance, dec!(0));
        for period in &periods {
            assert_eq!(period.interest, dec!(0));
        }
    }

    #[test]
    fn periods_end_on_month_boundaries() {
        let loan = loan(dec!(600), dec!(6), 3, date(2024, 1, 15));
        let periods = schedule(&loan).unwrap();

        assert_eq!(periods[0].period_start, date(2024, 1, 15));
        assert_eq!(periods[0].period_end, date(2024, 1, 31));
        // Later periods snap to calendar months, February included.
        assert_eq!(periods[1].period_start, date(2024, 2, 1));
        assert_eq!(periods[1].period_end, date(2024, 2, 29));
        assert_eq!(periods[2].period_start, date(2024, 3, 1));
        assert_eq!(periods[2].period_end, date(2024, 3, 31));
    }

    #[test]
    fn december_start_rolls_into_next_year() {
        let loan = loan(dec!(100), dec!(0), 2, date(2023, 12, 10));
        let periods = schedule(&loan).unwrap();
        assert_eq!(periods[0].period_end, date(2023, 12, 31));
        assert_eq!(periods[1].period_start, date(2024, 1, 1));
        assert_eq!(periods[1].period_end, date(2024, 1, 31));
    }

    #[test]
    fn unknown_loan_is_not_found() {
        let data = Dataset::default();
        assert!(matches!(
            amortization_schedule(&data, 42),
            Err(LedgerError::NotFound { entity: "Loan", id: 42 })
        ));
    }
}
