//! Time-series utilities shared by the replay session and the analysis helpers.
//!
//! Modules include:
//! - `continuity`: detect timing gaps, fill holes and sanity-check OHLCV data
//! - `resample`: aggregate a finer series into a coarser timeframe
//! - `sync`: resolve coarser timeframes against a primary timestamp
//! - `util`: date slicing and normalization helpers
/// Gap detection, hole filling and integrity checks.
pub mod continuity;
/// Aggregation into coarser timeframes.
pub mod resample;
/// Multi-timeframe synchronization.
pub mod sync;
/// Timestamp and calendar-date helpers.
pub mod util;
