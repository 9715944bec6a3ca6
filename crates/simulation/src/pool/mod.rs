//! Pool implementations and the shared swap interface.
//!
//! Both pool designs quote on the constant-product curve with the fee
//! deducted from the input before the curve is applied; they differ only
//! in how the collected fee is distributed across liquidity positions.

pub mod constant_product;
pub mod directional;
#[cfg(test)]
mod proptest_invariants;

pub use constant_product::ConstantProductPool;
pub use directional::{DirectionalPool, SubReserves};

use damm_domain::error::EngineError;
use damm_domain::token::TokenSide;
use damm_domain::value_objects::price::Price;
use rust_decimal::Decimal;

/// A swap applied to a pool during replay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trade {
    /// Side of the pair being sold into the pool.
    pub input: TokenSide,
    /// Gross input amount, fee included.
    pub amount_in: Decimal,
}

impl Trade {
    pub fn new(input: TokenSide, amount_in: Decimal) -> Self {
        Self { input, amount_in }
    }
}

/// Outcome of a quoted or executed swap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwapOutcome {
    /// Output-token amount leaving the pool.
    pub amount_out: Decimal,
    /// Fee retained by the pool, in input-token units.
    pub fee_collected: Decimal,
}

/// Shared swap/pricing interface for the two pool designs.
pub trait SwapPool {
    /// Spot price of token A in units of token B.
    fn spot_price(&self) -> Result<Price, EngineError>;

    /// Combined reserve of the given side.
    fn reserve(&self, side: TokenSide) -> Decimal;

    /// Proportional fee applied to swap inputs.
    fn fee_rate(&self) -> Decimal;

    /// Quotes a trade without mutating the pool.
    fn quote(&self, trade: Trade) -> Result<SwapOutcome, EngineError>;

    /// Executes a trade, mutating reserves. Fails on invalid input without
    /// touching pool state.
    fn apply(&mut self, trade: Trade) -> Result<SwapOutcome, EngineError>;
}
