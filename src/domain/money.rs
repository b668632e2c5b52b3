use crate::error::{LedgerError, Result};
use rust_decimal::Decimal;

/// Rounds a monetary value to 2 decimal places (banker's rounding).
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp(2)
}

/// Validates a transaction amount and lifts it into `Decimal`.
///
/// Amounts arrive as whole units at the API boundary; every movement except
/// deposits requires them to be strictly positive.
pub fn positive_amount(amount: i64) -> Result<Decimal> {
    if amount > 0 {
        Ok(Decimal::from(amount))
    } else {
        Err(LedgerError::invalid_argument(
            "'amount' must be a positive integer",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn round2_uses_bankers_rounding() {
        assert_eq!(round2(dec!(1.005)), dec!(1.00));
        assert_eq!(round2(dec!(1.015)), dec!(1.02));
        assert_eq!(round2(dec!(106.61854)), dec!(106.62));
    }

    #[test]
    fn positive_amount_rejects_zero_and_negative() {
        assert_eq!(positive_amount(25).unwrap(), dec!(25));
        assert!(matches!(
            positive_amount(0),
            Err(LedgerError::InvalidArgument(_))
        ));
        assert!(matches!(
            positive_amount(-5),
            Err(LedgerError::InvalidArgument(_))
        ));
    }
}
