//! Unified error type for the simulation engine.
//!
//! Errors fall into two classes: bad input, which fails the single run it
//! belongs to, and invariant violations, which indicate an internal defect
//! in the pool accounting and are the target of the property tests.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors produced by the simulation engine and its inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// A token amount that must be strictly positive was not.
    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// A price that must be strictly positive was not.
    #[error("price must be positive, got {0}")]
    NonPositivePrice(Decimal),

    /// Price observations must be ordered by strictly increasing timestamp.
    #[error("timestamps must be strictly increasing (violation at index {0})")]
    NonMonotonicTimestamps(usize),

    /// A long allocation outside the valid [0, 1] range.
    #[error("long percentage must be within [0, 1], got {0}")]
    LongPercentageOutOfRange(Decimal),

    /// A fee rate outside the valid [0, 1) range.
    #[error("fee rate must be within [0, 1), got {0}")]
    FeeRateOutOfRange(Decimal),

    /// A price series with no samples.
    #[error("price series must contain at least one sample")]
    EmptySeries,

    /// Two series for a pair that share no timestamps.
    #[error("pair series share no common timestamps")]
    DisjointSeries,

    /// A swap cannot be quoted against empty reserves.
    #[error("reserves must be positive to quote a swap")]
    ZeroReserve,

    /// The requested output exceeds what the pool holds.
    #[error("swap of {amount_in} would drain the output reserve ({reserve_out} available)")]
    InsufficientReserve {
        amount_in: Decimal,
        reserve_out: Decimal,
    },

    /// Pool accounting reached a state it must never reach.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

impl EngineError {
    /// Invariant violations are internal defects; every other variant is
    /// bad input that fails only the run it belongs to.
    #[must_use]
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::InvariantViolation(_))
    }
}
