//! Property-based tests for the pool accounting invariants.
//!
//! Covered properties:
//!
//! 1. **Invariant preservation** — `reserve_a * reserve_b` is
//!    non-decreasing across fee-bearing trades and constant without fees.
//! 2. **Sub-reserve accounting** — all four sub-reserves stay
//!    non-negative after every operation.
//! 3. **Fee conservation** — the directional pool's combined reserves
//!    match a reference pool run on the identical trade sequence.
//! 4. **Valuation idempotence** — withdrawable value at a fixed pool
//!    state never changes between calls.

use proptest::prelude::*;

use super::{ConstantProductPool, DirectionalPool, SwapPool, Trade};
use crate::strategy::PositioningStrategy;
use damm_domain::math::constant_product::invariant_k;
use damm_domain::token::TokenSide;
use damm_domain::value_objects::percentage::Percentage;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const FEE: Decimal = dec!(0.003);

/// Trade sequences as (sell-token-A, permille-of-input-reserve) pairs.
fn trade_sequences() -> impl Strategy<Value = Vec<(bool, u32)>> {
    prop::collection::vec((any::<bool>(), 1u32..300), 1..16)
}

fn sized_trade(pool: &impl SwapPool, sell_a: bool, permille: u32) -> Trade {
    let side = if sell_a { TokenSide::A } else { TokenSide::B };
    let amount_in = pool.reserve(side) * Decimal::from(permille) / Decimal::from(1000u32);
    Trade::new(side, amount_in)
}

fn relative_eq(left: Decimal, right: Decimal) -> bool {
    (left - right).abs() <= left.abs().max(right.abs()) * dec!(0.000000000001)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_k_non_decreasing_with_fees(
        seq in trade_sequences(),
        ra in 1_000u64..10_000_000,
        rb in 1_000u64..10_000_000,
    ) {
        let mut pool =
            ConstantProductPool::new(Decimal::from(ra), Decimal::from(rb), FEE).unwrap();
        let mut k = invariant_k(pool.reserve(TokenSide::A), pool.reserve(TokenSide::B));

        for (sell_a, permille) in seq {
            pool.apply(sized_trade(&pool, sell_a, permille)).unwrap();
            let k_after = invariant_k(pool.reserve(TokenSide::A), pool.reserve(TokenSide::B));
            prop_assert!(k_after >= k);
            k = k_after;
        }
    }

    #[test]
    fn prop_k_constant_without_fees(
        seq in trade_sequences(),
        ra in 1_000u64..10_000_000,
        rb in 1_000u64..10_000_000,
    ) {
        let mut pool =
            ConstantProductPool::new(Decimal::from(ra), Decimal::from(rb), Decimal::ZERO)
                .unwrap();
        let k_initial = invariant_k(pool.reserve(TokenSide::A), pool.reserve(TokenSide::B));

        for (sell_a, permille) in seq {
            pool.apply(sized_trade(&pool, sell_a, permille)).unwrap();
        }

        let k_final = invariant_k(pool.reserve(TokenSide::A), pool.reserve(TokenSide::B));
        prop_assert!(relative_eq(k_initial, k_final));
    }

    #[test]
    fn prop_directional_conserves_reference_reserves(
        seq in trade_sequences(),
        ra in 1_000u64..10_000_000,
        rb in 1_000u64..10_000_000,
    ) {
        let mut reference =
            ConstantProductPool::new(Decimal::from(ra), Decimal::from(rb), FEE).unwrap();
        let mut directional =
            DirectionalPool::new(Decimal::from(ra), Decimal::from(rb), FEE).unwrap();

        for (sell_a, permille) in seq {
            let trade = sized_trade(&reference, sell_a, permille);
            reference.apply(trade).unwrap();
            directional.apply(trade).unwrap();

            let reserves = directional.sub_reserves();
            prop_assert!(reserves.long_a >= Decimal::ZERO);
            prop_assert!(reserves.short_a >= Decimal::ZERO);
            prop_assert!(reserves.long_b >= Decimal::ZERO);
            prop_assert!(reserves.short_b >= Decimal::ZERO);
            prop_assert!(relative_eq(reserves.reserve_a(), reference.reserve(TokenSide::A)));
            prop_assert!(relative_eq(reserves.reserve_b(), reference.reserve(TokenSide::B)));
        }
    }

    #[test]
    fn prop_trade_shifts_long_share_toward_bought_token(
        permille in 1u32..300,
        ra in 1_000u64..10_000_000,
        rb in 1_000u64..10_000_000,
    ) {
        let mut pool = DirectionalPool::new(Decimal::from(ra), Decimal::from(rb), FEE).unwrap();
        let before = pool.sub_reserves();

        // Selling B buys A.
        pool.apply(sized_trade(&pool, false, permille)).unwrap();
        let after = pool.sub_reserves();

        prop_assert!(after.long_a / after.reserve_a() > before.long_a / before.reserve_a());
        prop_assert!(after.long_b / after.reserve_b() < before.long_b / before.reserve_b());
    }

    #[test]
    fn prop_valuation_idempotent(
        seq in trade_sequences(),
        long_a_bps in 0u32..=10_000,
        long_b_bps in 0u32..=10_000,
    ) {
        let mut pool = DirectionalPool::new(dec!(1000000), dec!(1000000), FEE).unwrap();
        let strategy = PositioningStrategy::new(
            Percentage::from_bps(long_a_bps),
            Percentage::from_bps(long_b_bps),
        )
        .unwrap();
        let ledger = pool.deposit(dec!(250000), dec!(250000), &strategy).unwrap();

        for (sell_a, permille) in seq {
            pool.apply(sized_trade(&pool, sell_a, permille)).unwrap();
        }

        let state = pool.sub_reserves();
        prop_assert_eq!(ledger.withdrawable(state), ledger.withdrawable(state));
    }
}
