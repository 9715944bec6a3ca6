//! Reference constant-product pool (Uniswap V2 style).
//!
//! The swap invariant is `x * y = k`. Fees stay in the input reserve, so
//! fee growth benefits every LP share pro rata regardless of position.

use super::{SwapOutcome, SwapPool, Trade};
use damm_domain::error::EngineError;
use damm_domain::math::constant_product::{quote_out_amount, spot_price};
use damm_domain::math::decimal_sqrt;
use damm_domain::token::TokenSide;
use damm_domain::value_objects::price::Price;
use rust_decimal::Decimal;

/// A constant-product pool with classic LP-share accounting.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantProductPool {
    reserve_a: Decimal,
    reserve_b: Decimal,
    fee_rate: Decimal,
    total_lp_supply: Decimal,
}

impl ConstantProductPool {
    /// Creates a pool seeded with base liquidity.
    ///
    /// Genesis LP supply is `sqrt(reserve_a * reserve_b)`.
    pub fn new(
        reserve_a: Decimal,
        reserve_b: Decimal,
        fee_rate: Decimal,
    ) -> Result<Self, EngineError> {
        if reserve_a <= Decimal::ZERO {
            return Err(EngineError::NonPositiveAmount(reserve_a));
        }
        if reserve_b <= Decimal::ZERO {
            return Err(EngineError::NonPositiveAmount(reserve_b));
        }
        let total_lp_supply = decimal_sqrt(reserve_a * reserve_b)?;
        Ok(Self {
            reserve_a,
            reserve_b,
            fee_rate,
            total_lp_supply,
        })
    }

    /// Deposits liquidity against current reserves and mints LP shares.
    ///
    /// Shares minted follow the limiting side:
    /// `min(amount_a * supply / reserve_a, amount_b * supply / reserve_b)`.
    pub fn deposit(&mut self, amount_a: Decimal, amount_b: Decimal) -> Result<Decimal, EngineError> {
        if amount_a <= Decimal::ZERO {
            return Err(EngineError::NonPositiveAmount(amount_a));
        }
        if amount_b <= Decimal::ZERO {
            return Err(EngineError::NonPositiveAmount(amount_b));
        }

        let by_a = amount_a * self.total_lp_supply / self.reserve_a;
        let by_b = amount_b * self.total_lp_supply / self.reserve_b;
        let minted = by_a.min(by_b);

        self.reserve_a += amount_a;
        self.reserve_b += amount_b;
        self.total_lp_supply += minted;

        Ok(minted)
    }

    /// Token amounts a holder of `lp_shares` could withdraw right now.
    #[must_use]
    pub fn withdrawable(&self, lp_shares: Decimal) -> (Decimal, Decimal) {
        if self.total_lp_supply.is_zero() {
            return (Decimal::ZERO, Decimal::ZERO);
        }
        let share = lp_shares / self.total_lp_supply;
        (self.reserve_a * share, self.reserve_b * share)
    }

    #[must_use]
    pub fn total_lp_supply(&self) -> Decimal {
        self.total_lp_supply
    }
}

impl SwapPool for ConstantProductPool {
    fn spot_price(&self) -> Result<Price, EngineError> {
        Price::new(spot_price(self.reserve_a, self.reserve_b)?)
    }

    fn reserve(&self, side: TokenSide) -> Decimal {
        match side {
            TokenSide::A => self.reserve_a,
            TokenSide::B => self.reserve_b,
        }
    }

    fn fee_rate(&self) -> Decimal {
        self.fee_rate
    }

    fn quote(&self, trade: Trade) -> Result<SwapOutcome, EngineError> {
        let reserve_in = self.reserve(trade.input);
        let reserve_out = self.reserve(trade.input.other());
        let (amount_out, fee_collected) =
            quote_out_amount(trade.amount_in, reserve_in, reserve_out, self.fee_rate)?;
        Ok(SwapOutcome {
            amount_out,
            fee_collected,
        })
    }

    fn apply(&mut self, trade: Trade) -> Result<SwapOutcome, EngineError> {
        let outcome = self.quote(trade)?;
        match trade.input {
            TokenSide::A => {
                self.reserve_a += trade.amount_in;
                self.reserve_b -= outcome.amount_out;
            }
            TokenSide::B => {
                self.reserve_b += trade.amount_in;
                self.reserve_a -= outcome.amount_out;
            }
        }
        Ok(outcome)
    }
}
