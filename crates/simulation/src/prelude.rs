//! Prelude module for convenient imports.
//!
//! Re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use damm_simulation::prelude::*;
//! ```

// Batch sweep
pub use crate::batch::{RunFailure, SweepOutcome, run_sweep};

// Position accounting
pub use crate::ledger::PositionLedger;

// Pools
pub use crate::pool::{
    ConstantProductPool, DirectionalPool, SubReserves, SwapOutcome, SwapPool, Trade,
};

// Price series
pub use crate::price_series::{
    GeometricBrownianMotion, PairSeries, PricePathGenerator, PricePoint, PriceSeries,
    synthetic_pair_series,
};

// Runner
pub use crate::runner::{SimulationConfig, SimulationRun, StepSnapshot, run_simulation};

// Strategies
pub use crate::strategy::{PositioningStrategy, calibration_set};

// Re-exported domain types
pub use damm_domain::error::EngineError;
pub use damm_domain::token::{Token, TokenPair, TokenSide};
pub use damm_domain::value_objects::percentage::Percentage;
pub use damm_domain::value_objects::price::Price;
pub use damm_domain::value_objects::simulation_result::SimulationResult;
