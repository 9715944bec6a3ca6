//! Price-history loading for the backtester.
//!
//! The simulation core never touches the filesystem; this crate owns the
//! boundary between on-disk price files and validated series.

pub mod loader;

pub use loader::{PriceHistoryFile, PriceRecord, load_pair, load_price_history};
