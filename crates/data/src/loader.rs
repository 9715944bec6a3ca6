//! JSON price-history files and pair alignment.
//!
//! A history file carries the token metadata plus its observations:
//!
//! ```json
//! {
//!   "token": { "symbol": "BTC", "name": "Bitcoin" },
//!   "prices": [
//!     { "date": "2021-01-01", "price": 29374.15 },
//!     { "timestamp": 1609545600, "price": 32127.27 }
//!   ]
//! }
//! ```
//!
//! Each record is identified by either a Unix `timestamp` in seconds or an
//! ISO `YYYY-MM-DD` `date` (taken at midnight UTC).

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use damm_domain::token::{Token, TokenPair};
use damm_domain::value_objects::price::Price;
use damm_simulation::price_series::{PairSeries, PricePoint, PriceSeries};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

/// One observation in a price-history file.
#[derive(Debug, Clone, Deserialize)]
pub struct PriceRecord {
    #[serde(default)]
    pub timestamp: Option<u64>,
    #[serde(default)]
    pub date: Option<String>,
    pub price: Decimal,
}

impl PriceRecord {
    fn resolve_timestamp(&self) -> Result<u64> {
        if let Some(timestamp) = self.timestamp {
            return Ok(timestamp);
        }
        let Some(date) = &self.date else {
            bail!("price record needs either a timestamp or a date");
        };
        let day = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .with_context(|| format!("invalid date {date}"))?;
        let seconds = day
            .and_hms_opt(0, 0, 0)
            .context("midnight is always representable")?
            .and_utc()
            .timestamp();
        if seconds < 0 {
            bail!("date {date} precedes the Unix epoch");
        }
        Ok(seconds as u64)
    }
}

/// On-disk shape of a price-history file.
#[derive(Debug, Clone, Deserialize)]
pub struct PriceHistoryFile {
    pub token: Token,
    pub prices: Vec<PriceRecord>,
}

/// Loads and validates one token's price history.
pub fn load_price_history(path: &Path) -> Result<(Token, PriceSeries)> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading price history {}", path.display()))?;
    let file: PriceHistoryFile = serde_json::from_str(&raw)
        .with_context(|| format!("parsing price history {}", path.display()))?;

    let mut points = Vec::with_capacity(file.prices.len());
    for record in &file.prices {
        points.push(PricePoint {
            timestamp: record.resolve_timestamp()?,
            price: Price::new(record.price)
                .with_context(|| format!("invalid price in {}", path.display()))?,
        });
    }

    let series = PriceSeries::new(points)
        .with_context(|| format!("validating price history {}", path.display()))?;
    info!(token = %file.token, samples = series.len(), "loaded price history");
    Ok((file.token, series))
}

/// Loads two histories and aligns them on their common timestamps.
pub fn load_pair(path_a: &Path, path_b: &Path) -> Result<(TokenPair, PairSeries)> {
    let (token_a, series_a) = load_price_history(path_a)?;
    let (token_b, series_b) = load_price_history(path_b)?;
    let pair = TokenPair::new(token_a, token_b);
    let aligned = PairSeries::align(&series_a, &series_b)
        .with_context(|| format!("aligning series for {}", pair.label()))?;
    Ok((pair, aligned))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_price_history_with_dates_and_timestamps() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "btc.json",
            r#"{
                "token": { "symbol": "BTC", "name": "Bitcoin" },
                "prices": [
                    { "date": "2021-01-01", "price": 29374.15 },
                    { "timestamp": 1609545600, "price": "32127.27" }
                ]
            }"#,
        );

        let (token, series) = load_price_history(&path).unwrap();
        assert_eq!(token.symbol, "BTC");
        assert_eq!(series.len(), 2);
        assert_eq!(series.points()[0].timestamp, 1_609_459_200);
        assert_eq!(series.points()[1].price.value(), dec!(32127.27));
    }

    #[test]
    fn test_load_rejects_unordered_observations() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "bad.json",
            r#"{
                "token": { "symbol": "X", "name": "X" },
                "prices": [
                    { "timestamp": 200, "price": 1 },
                    { "timestamp": 100, "price": 2 }
                ]
            }"#,
        );

        assert!(load_price_history(&path).is_err());
    }

    #[test]
    fn test_load_rejects_record_without_time() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "no-time.json",
            r#"{
                "token": { "symbol": "X", "name": "X" },
                "prices": [ { "price": 1 } ]
            }"#,
        );

        assert!(load_price_history(&path).is_err());
    }

    #[test]
    fn test_load_pair_aligns_common_dates() {
        let dir = tempfile::tempdir().unwrap();
        let path_a = write_file(
            &dir,
            "a.json",
            r#"{
                "token": { "symbol": "AAA", "name": "Alpha" },
                "prices": [
                    { "timestamp": 100, "price": 10 },
                    { "timestamp": 200, "price": 11 },
                    { "timestamp": 300, "price": 12 }
                ]
            }"#,
        );
        let path_b = write_file(
            &dir,
            "b.json",
            r#"{
                "token": { "symbol": "BBB", "name": "Beta" },
                "prices": [
                    { "timestamp": 200, "price": 5 },
                    { "timestamp": 300, "price": 4 }
                ]
            }"#,
        );

        let (pair, aligned) = load_pair(&path_a, &path_b).unwrap();
        assert_eq!(pair.label(), "AAA/BBB");
        assert_eq!(aligned.len(), 2);
        assert_eq!(aligned.relative_price(0).value(), dec!(2.2));
    }
}
