//! Sweep driver over pairs and strategies.
//!
//! The sweep calls the pure per-run entry point and collects results into
//! a caller-owned structure. A failing run is recorded and the sweep
//! continues; nothing is shared between runs.

use crate::price_series::PairSeries;
use crate::runner::{SimulationConfig, run_simulation};
use crate::strategy::PositioningStrategy;
use damm_domain::error::EngineError;
use damm_domain::token::TokenPair;
use damm_domain::value_objects::simulation_result::SimulationResult;
use tracing::warn;

/// A single failed run, recorded so the sweep can continue.
#[derive(Debug, Clone, PartialEq)]
pub struct RunFailure {
    pub pair: String,
    pub strategy_id: String,
    pub error: EngineError,
}

/// Outcome of a full sweep: completed runs plus recorded failures.
#[derive(Debug, Clone, Default)]
pub struct SweepOutcome {
    pub results: Vec<SimulationResult>,
    pub failures: Vec<RunFailure>,
}

/// Runs every (pair, strategy) combination.
pub fn run_sweep(
    pairs: &[(TokenPair, PairSeries)],
    strategies: &[PositioningStrategy],
    config: &SimulationConfig,
) -> SweepOutcome {
    let mut outcome = SweepOutcome::default();

    for (pair, series) in pairs {
        for strategy in strategies {
            match run_simulation(pair, series, strategy, config) {
                Ok(run) => outcome.results.push(run.result),
                Err(error) => {
                    warn!(
                        pair = %pair.label(),
                        strategy = %strategy.id(),
                        %error,
                        "simulation run failed"
                    );
                    outcome.failures.push(RunFailure {
                        pair: pair.label(),
                        strategy_id: strategy.id(),
                        error,
                    });
                }
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::price_series::{PricePoint, PriceSeries};
    use crate::strategy::calibration_set;
    use damm_domain::token::Token;
    use damm_domain::value_objects::price::Price;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn series(prices: &[Decimal]) -> PriceSeries {
        PriceSeries::new(
            prices
                .iter()
                .enumerate()
                .map(|(i, p)| PricePoint {
                    timestamp: (i as u64 + 1) * 86_400,
                    price: Price::new(*p).unwrap(),
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_sweep_covers_every_combination() {
        let pair = TokenPair::new(Token::new("ALPHA", "Alpha"), Token::new("USD", "Dollar"));
        let aligned = PairSeries::align(
            &series(&[dec!(1), dec!(1.2), dec!(1.4)]),
            &series(&[dec!(1), dec!(1), dec!(1)]),
        )
        .unwrap();

        let strategies = calibration_set();
        let outcome = run_sweep(&[(pair, aligned)], &strategies, &SimulationConfig::new());

        assert_eq!(outcome.results.len(), strategies.len());
        assert!(outcome.failures.is_empty());
    }

    #[test]
    fn test_sweep_records_failures_and_continues() {
        let pair = TokenPair::new(Token::new("ALPHA", "Alpha"), Token::new("USD", "Dollar"));
        let aligned = PairSeries::align(&series(&[dec!(1)]), &series(&[dec!(1)])).unwrap();

        // An out-of-range strategy fails its runs; the valid one still
        // completes.
        let bad = PositioningStrategy {
            long_pct_token_a: damm_domain::value_objects::percentage::Percentage(dec!(1.5)),
            long_pct_token_b: damm_domain::value_objects::percentage::Percentage(dec!(0)),
        };
        let good = calibration_set()[2];

        let outcome = run_sweep(&[(pair, aligned)], &[bad, good], &SimulationConfig::new());
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].strategy_id, "long-150-0");
    }
}
