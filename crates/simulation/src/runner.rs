//! Per-run replay of a price series against both pool designs.
//!
//! One run owns one reference pool and one directional pool, steps both
//! through the pair's price series with synthetic trades that move each
//! pool's spot price onto the observed relative market price, and values
//! the participant's position at the end of the period.

use crate::ledger::PositionLedger;
use crate::pool::{ConstantProductPool, DirectionalPool, SubReserves, SwapPool, Trade};
use crate::price_series::PairSeries;
use crate::strategy::PositioningStrategy;
use damm_domain::error::EngineError;
use damm_domain::math::constant_product::trade_to_target_price;
use damm_domain::metrics::{advantage_percent, percent_change};
use damm_domain::token::{TokenPair, TokenSide};
use damm_domain::value_objects::percentage::Percentage;
use damm_domain::value_objects::price::Price;
use damm_domain::value_objects::simulation_result::SimulationResult;
use rust_decimal::Decimal;
use tracing::debug;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Initial pool depth in USD.
    pub base_liquidity_usd: Decimal,
    /// Simulated participant stake in USD.
    pub user_deposit_usd: Decimal,
    /// Proportional swap fee.
    pub fee_rate: Percentage,
}

impl SimulationConfig {
    /// Creates a config with the calibration defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_liquidity_usd: Decimal::from(50_000),
            user_deposit_usd: Decimal::from(50_000),
            fee_rate: Percentage::from_bps(30),
        }
    }

    /// Sets the initial pool depth in USD.
    #[must_use]
    pub fn with_base_liquidity(mut self, usd: Decimal) -> Self {
        self.base_liquidity_usd = usd;
        self
    }

    /// Sets the participant stake in USD.
    #[must_use]
    pub fn with_user_deposit(mut self, usd: Decimal) -> Self {
        self.user_deposit_usd = usd;
        self
    }

    /// Sets the swap fee in basis points.
    #[must_use]
    pub fn with_fee_bps(mut self, bps: u32) -> Self {
        self.fee_rate = Percentage::from_bps(bps);
        self
    }

    fn validate(&self) -> Result<(), EngineError> {
        if self.base_liquidity_usd <= Decimal::ZERO {
            return Err(EngineError::NonPositiveAmount(self.base_liquidity_usd));
        }
        if self.user_deposit_usd <= Decimal::ZERO {
            return Err(EngineError::NonPositiveAmount(self.user_deposit_usd));
        }
        if self.fee_rate.0 < Decimal::ZERO || self.fee_rate.0 >= Decimal::ONE {
            return Err(EngineError::FeeRateOutOfRange(self.fee_rate.0));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-step record of both pools and the participant's withdrawable value.
#[derive(Debug, Clone)]
pub struct StepSnapshot {
    pub step: usize,
    pub timestamp: u64,
    /// Relative market price of token A in token B units at this step.
    pub target_price: Price,
    pub reference_reserve_a: Decimal,
    pub reference_reserve_b: Decimal,
    pub directional_reserves: SubReserves,
    /// Fees collected so far, valued in USD at trade-time prices.
    pub cumulative_fees_usd: Decimal,
    /// Participant value under the reference pool, in USD at this step.
    pub uniswap_value: Decimal,
    /// Participant value under the directional pool, in USD at this step.
    pub pennysia_value: Decimal,
}

/// Everything produced by one run.
#[derive(Debug, Clone)]
pub struct SimulationRun {
    pub result: SimulationResult,
    pub history: Vec<StepSnapshot>,
    pub ledger: PositionLedger,
}

impl SimulationRun {
    /// Participant values `(uniswap, pennysia)` at an observed timestamp,
    /// or `None` when the timestamp was not part of the series.
    #[must_use]
    pub fn value_at(&self, timestamp: u64) -> Option<(Decimal, Decimal)> {
        self.history
            .binary_search_by_key(&timestamp, |snapshot| snapshot.timestamp)
            .ok()
            .map(|index| {
                let snapshot = &self.history[index];
                (snapshot.uniswap_value, snapshot.pennysia_value)
            })
    }
}

/// Replays one price series for one strategy and produces the comparison
/// record.
pub fn run_simulation(
    pair: &TokenPair,
    series: &PairSeries,
    strategy: &PositioningStrategy,
    config: &SimulationConfig,
) -> Result<SimulationRun, EngineError> {
    config.validate()?;
    let strategy = PositioningStrategy::new(strategy.long_pct_token_a, strategy.long_pct_token_b)?;

    let steps = series.len();
    let p0_a = series.price_a(0).value();
    let p0_b = series.price_b(0).value();

    debug!(
        pair = %pair.label(),
        strategy = %strategy.id(),
        steps,
        "starting simulation run"
    );

    // Both deposits are split 50/50 in USD across the two tokens at the
    // opening prices.
    let two = Decimal::from(2);
    let base_amount_a = config.base_liquidity_usd / two / p0_a;
    let base_amount_b = config.base_liquidity_usd / two / p0_b;
    let user_amount_a = config.user_deposit_usd / two / p0_a;
    let user_amount_b = config.user_deposit_usd / two / p0_b;

    let mut reference = ConstantProductPool::new(base_amount_a, base_amount_b, config.fee_rate.0)?;
    let user_lp = reference.deposit(user_amount_a, user_amount_b)?;

    let mut directional = DirectionalPool::new(base_amount_a, base_amount_b, config.fee_rate.0)?;
    let ledger = directional.deposit(user_amount_a, user_amount_b, &strategy)?;

    let mut cumulative_fees_usd = Decimal::ZERO;
    let mut history = Vec::with_capacity(steps);
    history.push(snapshot(
        0,
        series,
        &reference,
        user_lp,
        &directional,
        &ledger,
        cumulative_fees_usd,
    ));

    for step in 1..steps {
        let target = series.relative_price(step).value();

        // Each pool sizes its own trade from its own reserves; the pools
        // move in lockstep because their combined reserves agree.
        if let Some((side, amount_in)) = trade_to_target_price(
            reference.reserve(TokenSide::A),
            reference.reserve(TokenSide::B),
            target,
        )? {
            let outcome = reference.apply(Trade::new(side, amount_in))?;
            let input_price = match side {
                TokenSide::A => series.price_a(step).value(),
                TokenSide::B => series.price_b(step).value(),
            };
            cumulative_fees_usd += outcome.fee_collected * input_price;
        }

        if let Some((side, amount_in)) = trade_to_target_price(
            directional.reserve(TokenSide::A),
            directional.reserve(TokenSide::B),
            target,
        )? {
            directional.apply(Trade::new(side, amount_in))?;
        }

        history.push(snapshot(
            step,
            series,
            &reference,
            user_lp,
            &directional,
            &ledger,
            cumulative_fees_usd,
        ));
    }

    let final_a = series.price_a(steps - 1).value();
    let final_b = series.price_b(steps - 1).value();

    let (uni_a, uni_b) = reference.withdrawable(user_lp);
    let uniswap_final_value = uni_a * final_a + uni_b * final_b;
    let (dir_a, dir_b) = ledger.withdrawable(directional.sub_reserves());
    let pennysia_final_value = dir_a * final_a + dir_b * final_b;

    let result = SimulationResult {
        pair: pair.label(),
        strategy_id: strategy.id(),
        uniswap_final_value,
        pennysia_final_value,
        advantage_percent: advantage_percent(
            uniswap_final_value,
            pennysia_final_value,
            config.user_deposit_usd,
        )?,
        token_a_price_change_percent: percent_change(p0_a, final_a)?,
        token_b_price_change_percent: percent_change(p0_b, final_b)?,
    };

    Ok(SimulationRun {
        result,
        history,
        ledger,
    })
}

fn snapshot(
    step: usize,
    series: &PairSeries,
    reference: &ConstantProductPool,
    user_lp: Decimal,
    directional: &DirectionalPool,
    ledger: &PositionLedger,
    cumulative_fees_usd: Decimal,
) -> StepSnapshot {
    let price_a = series.price_a(step).value();
    let price_b = series.price_b(step).value();

    let (uni_a, uni_b) = reference.withdrawable(user_lp);
    let (dir_a, dir_b) = ledger.withdrawable(directional.sub_reserves());

    StepSnapshot {
        step,
        timestamp: series.timestamp(step),
        target_price: series.relative_price(step),
        reference_reserve_a: reference.reserve(TokenSide::A),
        reference_reserve_b: reference.reserve(TokenSide::B),
        directional_reserves: directional.sub_reserves(),
        cumulative_fees_usd,
        uniswap_value: uni_a * price_a + uni_b * price_b,
        pennysia_value: dir_a * price_a + dir_b * price_b,
    }
}
