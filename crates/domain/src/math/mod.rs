pub mod constant_product;

use crate::error::EngineError;
use rust_decimal::Decimal;
use rust_decimal::prelude::*;

/// Square root of a non-negative `Decimal`.
///
/// Goes through an f64 round-trip; the inputs this engine produces are
/// well within f64 range and the replay stays deterministic.
pub fn decimal_sqrt(value: Decimal) -> Result<Decimal, EngineError> {
    if value < Decimal::ZERO {
        return Err(EngineError::InvariantViolation(format!(
            "square root of negative value {value}"
        )));
    }
    let f = value
        .to_f64()
        .ok_or_else(|| EngineError::InvariantViolation("value out of f64 range".to_string()))?;
    Decimal::from_f64(f.sqrt())
        .ok_or_else(|| EngineError::InvariantViolation("sqrt result out of range".to_string()))
}
