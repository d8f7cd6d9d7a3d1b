//! Value objects produced by the pattern detector and the series validators.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a fair value gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapKind {
    /// Price displaced upward, leaving an unfilled range below.
    Bullish,
    /// Price displaced downward, leaving an unfilled range above.
    Bearish,
}

/// Lifecycle of a fair value gap as seen at detection time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapStatus {
    /// No close crossed the gap's far boundary inside the lookback window.
    Valid,
    /// A later close crossed back through the gap's far boundary.
    Cleared,
}

/// One three-candle price imbalance.
///
/// `top_price > bottom_price` for both kinds. `left_index`, `middle_index` and
/// `detection_index` are consecutive positions in the scanned series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FairValueGap {
    /// Direction of the imbalance.
    pub kind: GapKind,
    /// Upper edge of the unfilled range.
    pub top_price: Decimal,
    /// Lower edge of the unfilled range.
    pub bottom_price: Decimal,
    /// Open time of the left candle.
    pub start_time: i64,
    /// Open time of the candle closing the display horizon.
    pub end_time: i64,
    /// Position of the right (confirming) candle.
    pub detection_index: usize,
    /// Position of the left candle.
    pub left_index: usize,
    /// Position of the middle (displacement) candle.
    pub middle_index: usize,
    /// Clearance status computed once at detection time.
    pub status: GapStatus,
    /// Position of the first clearing close, when cleared.
    pub cleared_index: Option<usize>,
}

impl FairValueGap {
    /// Returns true if the gap has been cleared.
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.status == GapStatus::Cleared
    }
}

/// A timing discontinuity between two consecutive candles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContinuityGap {
    /// Position of the candle before the gap.
    pub index: usize,
    /// Open time of the candle before the gap.
    pub from_time: i64,
    /// Open time of the candle after the gap.
    pub to_time: i64,
    /// `to_time - from_time`.
    pub gap_seconds: i64,
    /// `gap_seconds / 60`, truncated.
    pub gap_minutes: i64,
}

/// Result of a continuity check over one series.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContinuityReport {
    /// `true` when no gap was found.
    pub is_continuous: bool,
    /// Gaps in series order.
    pub gaps: Vec<ContinuityGap>,
    /// `gaps.len()`.
    pub total_gaps: usize,
}

impl ContinuityReport {
    /// Build a report from the gaps found.
    #[must_use]
    pub fn from_gaps(gaps: Vec<ContinuityGap>) -> Self {
        Self {
            is_continuous: gaps.is_empty(),
            total_gaps: gaps.len(),
            gaps,
        }
    }
}

/// A single OHLCV sanity violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
#[non_exhaustive]
pub enum IntegrityIssue {
    /// The series holds no candles.
    Empty,
    /// `high < low` at `index`.
    HighBelowLow {
        /// Offending position.
        index: usize,
    },
    /// Open or close outside the high/low range at `index`.
    InvalidOhlc {
        /// Offending position.
        index: usize,
    },
    /// Timestamp at `index` is not after the previous one.
    NonIncreasingTimestamps {
        /// Offending position.
        index: usize,
    },
}

/// Result of an OHLCV sanity pass.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IntegrityReport {
    /// `true` when `issues` is empty.
    pub valid: bool,
    /// Violations in series order.
    pub issues: Vec<IntegrityIssue>,
}
