use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Timeframe;

/// Unified error type for the rewind workspace.
///
/// This covers missing data for a requested date, commands issued before a session
/// was loaded, out-of-range seeks, rejected speeds, loader failures and faults raised
/// while a stream was ticking.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq)]
#[non_exhaustive]
pub enum ReplayError {
    /// The requested date has no candles in the given timeframe.
    #[error("no {timeframe} data available for {date}")]
    NoData {
        /// Requested calendar date, formatted `YYYY-MM-DD`.
        date: String,
        /// Timeframe that was required but empty.
        timeframe: Timeframe,
    },

    /// A command was issued before `start` succeeded.
    #[error("no replay data loaded")]
    NotLoaded,

    /// Seek target outside `[0, total)`.
    #[error("index out of range: {index} (total {total})")]
    IndexOutOfRange {
        /// Requested primary index.
        index: usize,
        /// Number of primary candles in the session.
        total: usize,
    },

    /// Playback speed is not part of the configured set.
    #[error("invalid speed: {speed}")]
    InvalidSpeed {
        /// Rejected speed in seconds per tick.
        speed: f64,
    },

    /// Unexpected failure while ticking; terminates the current stream only.
    #[error("stream fault: {0}")]
    StreamFault(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// The series store has not finished loading.
    #[error("data not ready")]
    DataNotReady,

    /// The ingestion collaborator failed to load a timeframe.
    #[error("loading {timeframe} failed: {msg}")]
    Loader {
        /// Timeframe being loaded.
        timeframe: Timeframe,
        /// Human-readable error message.
        msg: String,
    },
}

impl ReplayError {
    /// Helper: build a `NoData` error for a date and timeframe.
    pub fn no_data(date: impl Into<String>, timeframe: Timeframe) -> Self {
        Self::NoData {
            date: date.into(),
            timeframe,
        }
    }

    /// Helper: build a `Loader` error tagged with the timeframe being loaded.
    pub fn loader(timeframe: Timeframe, msg: impl Into<String>) -> Self {
        Self::Loader {
            timeframe,
            msg: msg.into(),
        }
    }

    /// Helper: build a `StreamFault` from any displayable cause.
    pub fn fault(msg: impl Into<String>) -> Self {
        Self::StreamFault(msg.into())
    }

    /// Returns true if the session is still usable after this error.
    ///
    /// Every command failure leaves the session as it was; only loader failures
    /// and a store that is not ready require operator action outside the session.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Loader { .. } | Self::DataNotReady)
    }
}
