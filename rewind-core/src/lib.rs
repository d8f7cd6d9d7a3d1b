//! rewind-core
//!
//! Data plumbing and pure analysis used by the rewind replay engine.
//!
//! - `store`: in-memory per-timeframe candle series.
//! - `ingest`: the `SeriesLoader` boundary and the progress-reporting load driver.
//! - `patterns`: fair value gap detection.
//! - `timeseries`: continuity checks, hole filling, resampling and timeframe
//!   synchronization.
//! - `calendar`: US market hours and holiday classification.
//!
//! Async runtime (Tokio)
//! ---------------------
//! `stream::StreamHandle` wraps `tokio::task::JoinHandle<()>` and uses
//! `tokio::sync::oneshot::Sender<()>` for cooperative shutdown, and `ingest`
//! reports progress over `tokio::sync::watch`. Code using either must run under a
//! Tokio 1.x runtime.
#![warn(missing_docs)]

/// US market calendar boundary.
pub mod calendar;
/// Series ingestion boundary.
pub mod ingest;
/// Candle pattern detectors.
pub mod patterns;
/// In-memory series store.
pub mod store;
/// Stream handle and drop-time cleanup helpers.
pub mod stream;
/// Time-series utilities.
pub mod timeseries;

pub use calendar::{HolidayInfo, MarketCalendar, MarketHours, TradingStatus};
pub use ingest::{SeriesLoader, load_store};
pub use patterns::fvg::{FvgDetector, detect_fair_value_gaps};
pub use store::SeriesStore;
pub use stream::StreamHandle;
pub use timeseries::continuity::{check_continuity, fill_missing_candles, validate_integrity};
pub use timeseries::resample::resample;
pub use rewind_types::*;
