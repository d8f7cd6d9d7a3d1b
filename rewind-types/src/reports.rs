//! Report envelopes returned by the replay controller and the ingestion driver.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{ContinuityReport, FairValueGap, IntegrityReport, Timeframe};

/// Playback phase of a replay session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// No session loaded.
    #[default]
    Idle,
    /// Loaded, never played.
    Ready,
    /// Ticking.
    Playing,
    /// Loaded and halted; cursors retained.
    Paused,
}

impl SessionPhase {
    /// Returns true when a session is loaded.
    #[must_use]
    pub const fn is_loaded(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Outcome of a successful `start`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadyReport {
    /// Replayed calendar date.
    pub date: NaiveDate,
    /// Number of primary candles for the date.
    pub total_candles: usize,
    /// Playback speed in seconds per tick.
    pub speed: f64,
    /// Timeframe driving the replay clock.
    pub primary: Timeframe,
    /// Timeframes with at least one candle on the date, finest first.
    pub loaded_timeframes: Vec<Timeframe>,
}

/// Point-in-time view of the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStatus {
    /// Current phase.
    pub phase: SessionPhase,
    /// `phase == Playing`.
    pub is_playing: bool,
    /// Session date, when loaded.
    pub current_date: Option<NaiveDate>,
    /// Primary cursor.
    pub current_index: usize,
    /// Number of primary candles.
    pub total_candles: usize,
    /// Playback speed in seconds per tick.
    pub speed: f64,
    /// `current_index / total_candles * 100`, or 0 when nothing is loaded.
    pub progress: f64,
    /// Timeframes with data on the session date.
    pub loaded_timeframes: Vec<Timeframe>,
    /// Cursor of every loaded timeframe.
    pub cursors: BTreeMap<Timeframe, usize>,
}

/// Progress of the one-shot series ingestion.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LoadProgress {
    /// Timeframes processed so far, failed ones included.
    pub completed: usize,
    /// Timeframes to process.
    pub total: usize,
    /// Timeframe currently being loaded.
    pub current: Option<Timeframe>,
    /// `completed / total * 100`.
    pub percentage: f64,
    /// Human-readable progress line.
    pub message: String,
    /// Set once the store has been built.
    pub ready: bool,
}

/// On-demand analysis of one timeframe for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Analyzed timeframe.
    pub timeframe: Timeframe,
    /// Analyzed calendar date.
    pub date: NaiveDate,
    /// Number of candles scanned.
    pub candle_count: usize,
    /// Fair value gaps in detection order.
    pub fair_value_gaps: Vec<FairValueGap>,
    /// Timing gaps against the timeframe's spacing.
    pub continuity: ContinuityReport,
    /// OHLCV sanity violations.
    pub integrity: IntegrityReport,
}
