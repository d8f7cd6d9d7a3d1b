//! Wire objects emitted by the replay stream.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Candle, SessionPhase, Timeframe};

/// A candle as seen by the consumer for one timeframe on one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandleSnapshot {
    /// Timeframe the candle belongs to.
    pub timeframe: Timeframe,
    /// Candle open time, seconds since epoch.
    pub timestamp: i64,
    /// Opening price.
    pub open: Decimal,
    /// Highest price.
    pub high: Decimal,
    /// Lowest price.
    pub low: Decimal,
    /// Closing price.
    pub close: Decimal,
    /// Traded volume.
    pub volume: u64,
    /// Position of the candle in its timeframe's series for the session date.
    pub index: usize,
}

impl CandleSnapshot {
    /// Snapshot `candle` found at `index` in the `timeframe` series.
    #[must_use]
    pub const fn new(timeframe: Timeframe, index: usize, candle: &Candle) -> Self {
        Self {
            timeframe,
            timestamp: candle.ts,
            open: candle.open,
            high: candle.high,
            low: candle.low,
            close: candle.close,
            volume: candle.volume,
            index,
        }
    }
}

/// One event on the replay stream, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum ReplayEvent {
    /// Emitted while the session is not playing.
    Heartbeat {
        /// Phase of the session when the heartbeat was produced.
        status: SessionPhase,
    },
    /// Every loaded timeframe synchronized to one primary tick.
    MultiTimeframeCandle {
        /// Timeframe driving the replay clock.
        primary: Timeframe,
        /// Primary position that produced this tick.
        index: usize,
        /// `index / total * 100`.
        progress: f64,
        /// Snapshots for each timeframe that resolved a candle.
        candles: BTreeMap<Timeframe, CandleSnapshot>,
    },
    /// Flat echo of the primary candle, kept for single-series consumers.
    Candle {
        /// Primary timeframe.
        timeframe: Timeframe,
        /// Candle open time, seconds since epoch.
        timestamp: i64,
        /// Same as `timestamp`; the field name charting clients read.
        time: i64,
        /// Opening price.
        open: Decimal,
        /// Highest price.
        high: Decimal,
        /// Lowest price.
        low: Decimal,
        /// Closing price.
        close: Decimal,
        /// Traded volume.
        volume: u64,
        /// Primary position.
        index: usize,
        /// `index / total * 100`.
        progress: f64,
    },
    /// The primary series has been fully replayed.
    Finished {
        /// Human-readable completion message.
        message: String,
    },
    /// The stream hit a fault and is ending.
    Error {
        /// Human-readable description of the fault.
        message: String,
    },
}

impl ReplayEvent {
    /// The completion event emitted once at the end of the primary series.
    #[must_use]
    pub fn finished() -> Self {
        Self::Finished {
            message: "Replay completed".to_string(),
        }
    }

    /// Returns true for events after which the stream ends.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished { .. } | Self::Error { .. })
    }
}
