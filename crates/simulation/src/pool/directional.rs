//! Directional pool: long/short sub-positions with asymmetric fee routing.
//!
//! Pricing and quoting are identical to the reference pool on the combined
//! reserves; directionality affects only where collected fees land. Every
//! trade raises the long-side share of the token being bought and lowers
//! the long-side share of the token being sold, so a position that is long
//! the token the market is net-buying accrues a disproportionate share of
//! fees.

use super::{SwapOutcome, SwapPool, Trade};
use crate::ledger::PositionLedger;
use crate::strategy::PositioningStrategy;
use damm_domain::error::EngineError;
use damm_domain::math::constant_product::{quote_out_amount, spot_price};
use damm_domain::token::TokenSide;
use damm_domain::value_objects::price::Price;
use rust_decimal::Decimal;

/// Snapshot of the four sub-reserves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubReserves {
    pub long_a: Decimal,
    pub short_a: Decimal,
    pub long_b: Decimal,
    pub short_b: Decimal,
}

impl SubReserves {
    #[must_use]
    pub fn reserve_a(&self) -> Decimal {
        self.long_a + self.short_a
    }

    #[must_use]
    pub fn reserve_b(&self) -> Decimal {
        self.long_b + self.short_b
    }
}

/// A pool whose reserves are partitioned into long/short sub-positions
/// per token.
///
/// Only the four sub-reserves are stored; the combined reserves are
/// derived, so `long + short == reserve` holds by construction after
/// every operation.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalPool {
    long_a: Decimal,
    short_a: Decimal,
    long_b: Decimal,
    short_b: Decimal,
    fee_rate: Decimal,
}

impl DirectionalPool {
    /// Seeds the pool with base liquidity split evenly long/short on both
    /// tokens.
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
        let two = Decimal::from(2);
        Ok(Self {
            long_a: reserve_a / two,
            short_a: reserve_a / two,
            long_b: reserve_b / two,
            short_b: reserve_b / two,
            fee_rate,
        })
    }

    /// Deposits liquidity split per the strategy's long percentages and
    /// records the depositor's share of each sub-pool.
    pub fn deposit(
        &mut self,
        amount_a: Decimal,
        amount_b: Decimal,
        strategy: &PositioningStrategy,
    ) -> Result<PositionLedger, EngineError> {
        if amount_a <= Decimal::ZERO {
            return Err(EngineError::NonPositiveAmount(amount_a));
        }
        if amount_b <= Decimal::ZERO {
            return Err(EngineError::NonPositiveAmount(amount_b));
        }

        let long_a = strategy.long_pct_token_a.of(amount_a);
        let short_a = amount_a - long_a;
        let long_b = strategy.long_pct_token_b.of(amount_b);
        let short_b = amount_b - long_b;

        self.long_a += long_a;
        self.short_a += short_a;
        self.long_b += long_b;
        self.short_b += short_b;

        let deposited = SubReserves {
            long_a,
            short_a,
            long_b,
            short_b,
        };
        Ok(PositionLedger::from_deposit(deposited, self.sub_reserves()))
    }

    /// Current state of the four sub-reserves.
    #[must_use]
    pub fn sub_reserves(&self) -> SubReserves {
        SubReserves {
            long_a: self.long_a,
            short_a: self.short_a,
            long_b: self.long_b,
            short_b: self.short_b,
        }
    }

    fn check_invariants(&self) -> Result<(), EngineError> {
        for (name, value) in [
            ("long_a", self.long_a),
            ("short_a", self.short_a),
            ("long_b", self.long_b),
            ("short_b", self.short_b),
        ] {
            if value < Decimal::ZERO {
                return Err(EngineError::InvariantViolation(format!(
                    "sub-reserve {name} went negative: {value}"
                )));
            }
        }
        if self.long_a + self.short_a <= Decimal::ZERO || self.long_b + self.short_b <= Decimal::ZERO
        {
            return Err(EngineError::InvariantViolation(
                "combined reserve drained to zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl SwapPool for DirectionalPool {
    fn spot_price(&self) -> Result<Price, EngineError> {
        let reserves = self.sub_reserves();
        Price::new(spot_price(reserves.reserve_a(), reserves.reserve_b())?)
    }

    fn reserve(&self, side: TokenSide) -> Decimal {
        let reserves = self.sub_reserves();
        match side {
            TokenSide::A => reserves.reserve_a(),
            TokenSide::B => reserves.reserve_b(),
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

    /// Executes the swap against the combined reserves and routes the fee.
    ///
    /// The collected fee, valued in output-token units at the post-trade
    /// spot price, is credited to the long sub-reserve of the output token
    /// (financed pro rata by both sub-reserves as part of the output draw,
    /// so it can never push a sub-reserve negative). The input token's
    /// sub-reserves rebalance an equal value from long to short; if the
    /// long side cannot cover it the rebalance is skipped for this trade
    /// and the fee stays on the long side. The fee is never dropped.
    fn apply(&mut self, trade: Trade) -> Result<SwapOutcome, EngineError> {
        let outcome = self.quote(trade)?;
        let amount_in = trade.amount_in;
        let amount_out = outcome.amount_out;
        let fee = outcome.fee_collected;

        let in_total = self.reserve(trade.input);
        let out_total = self.reserve(trade.input.other());
        let post_in = in_total + amount_in;
        let post_out = out_total - amount_out;
        let fee_out_units = fee * post_out / post_in;

        let (long_in, short_in, long_out, short_out) = match trade.input {
            TokenSide::A => (
                &mut self.long_a,
                &mut self.short_a,
                &mut self.long_b,
                &mut self.short_b,
            ),
            TokenSide::B => (
                &mut self.long_b,
                &mut self.short_b,
                &mut self.long_a,
                &mut self.short_a,
            ),
        };

        // Input side: inflow lands pro rata, then the fee value moves from
        // the long to the short sub-reserve.
        let add_long = amount_in * (*long_in / in_total);
        let add_short = amount_in - add_long;
        *long_in += add_long;
        *short_in += add_short;
        if *long_in >= fee {
            *long_in -= fee;
            *short_in += fee;
        }

        // Output side: draw the output plus the fee value pro rata, then
        // credit the fee value to the long sub-reserve.
        let charge = amount_out + fee_out_units;
        let charge_long = charge * (*long_out / out_total);
        let charge_short = charge - charge_long;
        *long_out -= charge_long;
        *short_out -= charge_short;
        *long_out += fee_out_units;

        // Absorb rounding residue at the last representable digit so the
        // sub-reserve sums stay consistent and nothing sits below zero.
        if *long_out < Decimal::ZERO {
            *short_out += *long_out;
            *long_out = Decimal::ZERO;
        }
        if *short_out < Decimal::ZERO {
            *long_out += *short_out;
            *short_out = Decimal::ZERO;
        }

        self.check_invariants()?;
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::PositioningStrategy;
    use damm_domain::value_objects::percentage::Percentage;
    use rust_decimal_macros::dec;

    fn pool() -> DirectionalPool {
        DirectionalPool::new(dec!(1000), dec!(1000), dec!(0.003)).unwrap()
    }

    fn balanced() -> PositioningStrategy {
        PositioningStrategy::new(Percentage::from_bps(5000), Percentage::from_bps(5000)).unwrap()
    }

    #[test]
    fn test_base_liquidity_splits_evenly() {
        let reserves = pool().sub_reserves();
        assert_eq!(reserves.long_a, dec!(500));
        assert_eq!(reserves.short_a, dec!(500));
        assert_eq!(reserves.long_b, dec!(500));
        assert_eq!(reserves.short_b, dec!(500));
    }

    #[test]
    fn test_quote_matches_reference_pool() {
        let directional = pool();
        let reference =
            crate::pool::ConstantProductPool::new(dec!(1000), dec!(1000), dec!(0.003)).unwrap();

        let trade = Trade::new(TokenSide::A, dec!(75));
        assert_eq!(
            directional.quote(trade).unwrap(),
            reference.quote(trade).unwrap()
        );
    }

    #[test]
    fn test_swap_raises_long_share_of_bought_token() {
        let mut pool = pool();
        let before = pool.sub_reserves();

        // Selling B buys A: the long share of A must rise, the long share
        // of B must fall.
        pool.apply(Trade::new(TokenSide::B, dec!(100))).unwrap();
        let after = pool.sub_reserves();

        let long_share_a_before = before.long_a / before.reserve_a();
        let long_share_a_after = after.long_a / after.reserve_a();
        let long_share_b_before = before.long_b / before.reserve_b();
        let long_share_b_after = after.long_b / after.reserve_b();

        assert!(long_share_a_after > long_share_a_before);
        assert!(long_share_b_after < long_share_b_before);
    }

    #[test]
    fn test_combined_reserves_track_reference_pool() {
        let mut directional = pool();
        let mut reference =
            crate::pool::ConstantProductPool::new(dec!(1000), dec!(1000), dec!(0.003)).unwrap();

        for trade in [
            Trade::new(TokenSide::A, dec!(40)),
            Trade::new(TokenSide::B, dec!(90)),
            Trade::new(TokenSide::A, dec!(15)),
        ] {
            directional.apply(trade).unwrap();
            reference.apply(trade).unwrap();

            let reserves = directional.sub_reserves();
            assert!(
                (reserves.reserve_a() - reference.reserve(TokenSide::A)).abs()
                    < dec!(0.000000000000001)
            );
            assert!(
                (reserves.reserve_b() - reference.reserve(TokenSide::B)).abs()
                    < dec!(0.000000000000001)
            );
        }
    }

    #[test]
    fn test_rebalance_skipped_when_long_side_cannot_cover() {
        // All of token B sits on the short side, so the long -> short
        // rebalance on the input token has nothing to move.
        let mut pool = DirectionalPool {
            long_a: dec!(500),
            short_a: dec!(500),
            long_b: Decimal::ZERO,
            short_b: dec!(1000),
            fee_rate: dec!(0.003),
        };

        let outcome = pool.apply(Trade::new(TokenSide::B, dec!(100))).unwrap();
        let after = pool.sub_reserves();

        // Inflow lands entirely on the short side (pro rata of a zero long
        // share) and stays there: no rebalance happened.
        assert_eq!(after.long_b, Decimal::ZERO);
        assert_eq!(after.short_b, dec!(1100));
        // The fee is still credited to the long side of the output token.
        assert!(after.long_a > dec!(500) - outcome.amount_out);
        pool.check_invariants().unwrap();
    }

    #[test]
    fn test_deposit_records_sub_pool_fractions() {
        let mut pool = pool();
        let ledger = pool.deposit(dec!(500), dec!(500), &balanced()).unwrap();

        let (amount_a, amount_b) = ledger.withdrawable(pool.sub_reserves());
        assert_eq!(amount_a, dec!(500));
        assert_eq!(amount_b, dec!(500));
    }

    #[test]
    fn test_apply_rejects_invalid_trade_without_mutation() {
        let mut pool = pool();
        let before = pool.clone();
        assert!(pool.apply(Trade::new(TokenSide::A, dec!(-1))).is_err());
        assert_eq!(pool, before);
    }
}
