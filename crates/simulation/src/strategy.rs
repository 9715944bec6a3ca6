//! Directional positioning strategies.
//!
//! A strategy fixes, per token, which fraction of the participant's stake
//! goes to the long sub-position; the remainder goes short. The five
//! calibration splits are a closed set — adding a split means adding a
//! value here, never touching pool logic.

use damm_domain::error::EngineError;
use damm_domain::value_objects::percentage::Percentage;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// A fixed long/short split per token for one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositioningStrategy {
    /// Fraction of the token A stake allocated long.
    pub long_pct_token_a: Percentage,
    /// Fraction of the token B stake allocated long.
    pub long_pct_token_b: Percentage,
}

impl PositioningStrategy {
    pub fn new(
        long_pct_token_a: Percentage,
        long_pct_token_b: Percentage,
    ) -> Result<Self, EngineError> {
        for pct in [long_pct_token_a, long_pct_token_b] {
            if pct.0 < Decimal::ZERO || pct.0 > Decimal::ONE {
                return Err(EngineError::LongPercentageOutOfRange(pct.0));
            }
        }
        Ok(Self {
            long_pct_token_a,
            long_pct_token_b,
        })
    }

    /// Stable identifier used as the `strategyId` of result records,
    /// e.g. `long-75-25` for 75% long token A, 25% long token B.
    #[must_use]
    pub fn id(&self) -> String {
        format!(
            "long-{}-{}",
            Self::whole_percent(self.long_pct_token_a),
            Self::whole_percent(self.long_pct_token_b)
        )
    }

    /// Human-readable label for reports.
    #[must_use]
    pub fn label(&self) -> String {
        format!(
            "{}% Long A / {}% Long B",
            Self::whole_percent(self.long_pct_token_a),
            Self::whole_percent(self.long_pct_token_b)
        )
    }

    #[must_use]
    pub fn short_pct_token_a(&self) -> Percentage {
        self.long_pct_token_a.complement()
    }

    #[must_use]
    pub fn short_pct_token_b(&self) -> Percentage {
        self.long_pct_token_b.complement()
    }

    fn whole_percent(pct: Percentage) -> u32 {
        (pct.0 * Decimal::from(100)).round().to_u32().unwrap_or(0)
    }
}

/// The five calibration splits (token A long % / token B long %):
/// 100/0, 75/25, 50/50, 25/75, 0/100.
#[must_use]
pub fn calibration_set() -> Vec<PositioningStrategy> {
    [
        (10_000, 0),
        (7_500, 2_500),
        (5_000, 5_000),
        (2_500, 7_500),
        (0, 10_000),
    ]
    .into_iter()
    .map(|(long_a_bps, long_b_bps)| PositioningStrategy {
        long_pct_token_a: Percentage::from_bps(long_a_bps),
        long_pct_token_b: Percentage::from_bps(long_b_bps),
    })
    .collect()
}
