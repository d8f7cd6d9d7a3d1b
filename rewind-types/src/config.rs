//! Configuration types shared by the replay controller and the analysis helpers.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How coarser timeframes are resolved against the primary clock on every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SyncStrategy {
    /// Inspect a small window of positions around each timeframe's cursor.
    ///
    /// Constant work per tick. After a large seek the coarse views may lag for a few
    /// ticks while their cursors catch up.
    #[default]
    LocalWindow,
    /// Resolve each timeframe with a partition-point search over the whole day.
    ///
    /// Always exact, `O(log n)` per timeframe per tick.
    BinarySearch,
}

/// Parameters of the three-candle fair value gap detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FvgConfig {
    /// Number of candles after detection inspected for a clearing close.
    pub max_lookback: usize,
    /// Number of candles after the left candle used to compute a gap's `end_time`.
    pub display_horizon: usize,
}

impl Default for FvgConfig {
    fn default() -> Self {
        Self {
            max_lookback: 40,
            display_horizon: 40,
        }
    }
}

/// Global configuration for a `Replay` controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// Accepted playback speeds, in seconds between ticks.
    pub allowed_speeds: Vec<f64>,
    /// Speed used by `start` when the caller does not supply one.
    pub default_speed: f64,
    /// Wait between heartbeats while the session is not playing.
    pub heartbeat_interval: Duration,
    /// Capacity of the event channel handed to stream consumers.
    pub event_buffer: usize,
    /// Timeframe synchronization algorithm.
    pub sync_strategy: SyncStrategy,
    /// Half-width of the local synchronization window.
    pub sync_window: usize,
    /// Fair value gap detector parameters used by `analyze`.
    pub fvg: FvgConfig,
}

impl ReplayConfig {
    /// Returns true when `speed` is one of the configured playback speeds.
    #[must_use]
    pub fn is_allowed_speed(&self, speed: f64) -> bool {
        self.allowed_speeds
            .iter()
            .any(|allowed| (allowed - speed).abs() < f64::EPSILON)
    }
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            allowed_speeds: vec![0.5, 1.0, 2.0, 3.0, 5.0, 10.0],
            default_speed: 1.0,
            heartbeat_interval: Duration::from_secs(1),
            event_buffer: 64,
            sync_strategy: SyncStrategy::default(),
            sync_window: 2,
            fvg: FvgConfig::default(),
        }
    }
}
