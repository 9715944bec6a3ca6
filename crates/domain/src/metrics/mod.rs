//! Valuation metrics shared by the runner and reporting.

use crate::error::EngineError;
use rust_decimal::Decimal;

/// Percentage change from `start` to `end`, in percent units.
pub fn percent_change(start: Decimal, end: Decimal) -> Result<Decimal, EngineError> {
    if start <= Decimal::ZERO {
        return Err(EngineError::NonPositiveAmount(start));
    }
    Ok((end / start - Decimal::ONE) * Decimal::from(100))
}

/// Advantage of `candidate` over `reference` in percentage points of the
/// deposit `basis` (the difference of the two return percentages).
pub fn advantage_percent(
    reference: Decimal,
    candidate: Decimal,
    basis: Decimal,
) -> Result<Decimal, EngineError> {
    if basis <= Decimal::ZERO {
        return Err(EngineError::NonPositiveAmount(basis));
    }
    Ok((candidate - reference) / basis * Decimal::from(100))
}

/// USD value of simply holding the given token amounts.
pub fn hodl_value(
    amount_a: Decimal,
    amount_b: Decimal,
    price_a: Decimal,
    price_b: Decimal,
) -> Decimal {
    amount_a * price_a + amount_b * price_b
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_percent_change() {
        assert_eq!(percent_change(dec!(100), dec!(150)).unwrap(), dec!(50));
        assert_eq!(percent_change(dec!(100), dec!(80)).unwrap(), dec!(-20));
        assert!(percent_change(dec!(0), dec!(100)).is_err());
    }

    #[test]
    fn test_advantage_percent() {
        // candidate earned 53k vs reference 51k on a 50k deposit: +4 points
        assert_eq!(
            advantage_percent(dec!(51000), dec!(53000), dec!(50000)).unwrap(),
            dec!(4)
        );
    }

    #[test]
    fn test_hodl_value() {
        assert_eq!(
            hodl_value(dec!(2), dec!(10), dec!(30000), dec!(2000)),
            dec!(80000)
        );
    }
}
