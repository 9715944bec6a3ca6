//! Price series inputs and synthetic path generation.
//!
//! A [`PriceSeries`] is a validated, read-only sequence of USD price
//! observations for one token; a [`PairSeries`] aligns two of them on
//! their common timestamps so both legs of a pair can be replayed in
//! lockstep.

use damm_domain::error::EngineError;
use damm_domain::value_objects::price::Price;
use rand::Rng;
use rand_distr::StandardNormal;
use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// A single (timestamp, price) observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Unix timestamp in seconds.
    pub timestamp: u64,
    /// Observed USD price.
    pub price: Price,
}

/// An ordered sequence of price observations for one token.
///
/// Construction validates at least one sample and strictly increasing
/// timestamps; prices are positive by construction of [`Price`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(points: Vec<PricePoint>) -> Result<Self, EngineError> {
        if points.is_empty() {
            return Err(EngineError::EmptySeries);
        }
        for (index, point) in points.iter().enumerate() {
            if index > 0 && point.timestamp <= points[index - 1].timestamp {
                return Err(EngineError::NonMonotonicTimestamps(index));
            }
        }
        Ok(Self { points })
    }

    #[must_use]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Two USD series for a pair, aligned to their common timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct PairSeries {
    timestamps: Vec<u64>,
    prices_a: Vec<Price>,
    prices_b: Vec<Price>,
}

impl PairSeries {
    /// Intersects two series on timestamp.
    ///
    /// Both inputs are strictly increasing, so a single merge pass finds
    /// the common observations. Errors if the series share none.
    pub fn align(series_a: &PriceSeries, series_b: &PriceSeries) -> Result<Self, EngineError> {
        let a = series_a.points();
        let b = series_b.points();
        let mut timestamps = Vec::new();
        let mut prices_a = Vec::new();
        let mut prices_b = Vec::new();

        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match a[i].timestamp.cmp(&b[j].timestamp) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    timestamps.push(a[i].timestamp);
                    prices_a.push(a[i].price);
                    prices_b.push(b[j].price);
                    i += 1;
                    j += 1;
                }
            }
        }

        if timestamps.is_empty() {
            return Err(EngineError::DisjointSeries);
        }
        Ok(Self {
            timestamps,
            prices_a,
            prices_b,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    #[must_use]
    pub fn timestamp(&self, step: usize) -> u64 {
        self.timestamps[step]
    }

    #[must_use]
    pub fn price_a(&self, step: usize) -> Price {
        self.prices_a[step]
    }

    #[must_use]
    pub fn price_b(&self, step: usize) -> Price {
        self.prices_b[step]
    }

    /// Relative price of token A in units of token B at the given step.
    #[must_use]
    pub fn relative_price(&self, step: usize) -> Price {
        self.prices_a[step].per(self.prices_b[step])
    }
}

/// Generates price paths for what-if simulations.
pub trait PricePathGenerator {
    /// Produces the initial price followed by `steps` observations.
    fn generate(&mut self, steps: usize) -> Result<Vec<Price>, EngineError>;
}

/// Geometric Brownian motion path generator.
pub struct GeometricBrownianMotion {
    pub initial_price: Decimal,
    pub drift: f64,      // annualized drift (mu)
    pub volatility: f64, // annualized volatility (sigma)
    pub time_step: f64,  // time step in years (dt) e.g. 1/365 for daily
}

impl GeometricBrownianMotion {
    pub fn new(initial_price: Decimal, drift: f64, volatility: f64, time_step: f64) -> Self {
        Self {
            initial_price,
            drift,
            volatility,
            time_step,
        }
    }
}

impl PricePathGenerator for GeometricBrownianMotion {
    fn generate(&mut self, steps: usize) -> Result<Vec<Price>, EngineError> {
        let mut prices = Vec::with_capacity(steps + 1);
        prices.push(Price::new(self.initial_price)?);

        let mut rng = rand::rng();

        let dt = self.time_step;
        let drift_term = (self.drift - 0.5 * self.volatility.powi(2)) * dt;
        let vol_term = self.volatility * dt.sqrt();

        let mut current_price = self.initial_price.to_f64().unwrap_or(0.0);

        for _ in 0..steps {
            let z: f64 = rng.sample(StandardNormal);
            let change = (drift_term + vol_term * z).exp();
            current_price *= change;

            // f64 precision is standard for Monte Carlo paths; cast back
            // to Decimal for the domain object.
            let p = Decimal::from_f64(current_price).unwrap_or_default();
            prices.push(Price::new(p)?);
        }

        Ok(prices)
    }
}

/// Builds a [`PairSeries`] from a generated path for token A against a
/// stable quote token, with daily timestamps starting at `start_timestamp`.
pub fn synthetic_pair_series<G: PricePathGenerator>(
    generator: &mut G,
    steps: usize,
    start_timestamp: u64,
    quote_price: Decimal,
) -> Result<PairSeries, EngineError> {
    const DAY_SECONDS: u64 = 86_400;

    let quote = Price::new(quote_price)?;
    let path = generator.generate(steps)?;
    let points_a: Vec<PricePoint> = path
        .iter()
        .enumerate()
        .map(|(i, price)| PricePoint {
            timestamp: start_timestamp + i as u64 * DAY_SECONDS,
            price: *price,
        })
        .collect();
    let points_b: Vec<PricePoint> = points_a
        .iter()
        .map(|point| PricePoint {
            timestamp: point.timestamp,
            price: quote,
        })
        .collect();

    let series_a = PriceSeries::new(points_a)?;
    let series_b = PriceSeries::new(points_b)?;
    PairSeries::align(&series_a, &series_b)
}
