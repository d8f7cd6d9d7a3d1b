//! Mock series loaders and deterministic fixtures for rewind tests and demos.
use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use rewind_core::{Candle, ReplayError, SeriesLoader, Timeframe};

mod dynamic;
pub mod fixtures;

pub use dynamic::{DynamicMockController, DynamicMockLoader, MockBehavior};
pub use fixtures::session::{fixture_store, store};

/// Mock loader for CI-safe demos. Serves the synthetic fixture days from memory.
pub struct MockLoader {
    series: BTreeMap<Timeframe, Vec<Candle>>,
    fail: Vec<Timeframe>,
}

impl Default for MockLoader {
    fn default() -> Self {
        Self::new(
            &[
                fixtures::session::date(fixtures::session::DAY_ONE),
                fixtures::session::date(fixtures::session::DAY_TWO),
            ],
            fixtures::session::SESSION_MINUTES,
        )
    }
}

impl MockLoader {
    /// Serve `minutes` bars per day for each of `days`, in every timeframe.
    #[must_use]
    pub fn new(days: &[NaiveDate], minutes: usize) -> Self {
        let mut series: BTreeMap<Timeframe, Vec<Candle>> = BTreeMap::new();
        for day in days {
            for (tf, candles) in fixtures::session::trading_day(*day, minutes) {
                series.entry(tf).or_default().extend(candles);
            }
        }
        Self {
            series,
            fail: Vec::new(),
        }
    }

    /// Make loads of `timeframe` fail with a loader error.
    #[must_use]
    pub fn failing(mut self, timeframe: Timeframe) -> Self {
        self.fail.push(timeframe);
        self
    }
}

#[async_trait]
impl SeriesLoader for MockLoader {
    fn timeframes(&self) -> Vec<Timeframe> {
        self.series.keys().copied().collect()
    }

    async fn load(&self, timeframe: Timeframe) -> Result<Vec<Candle>, ReplayError> {
        if self.fail.contains(&timeframe) {
            return Err(ReplayError::loader(timeframe, "forced failure"));
        }
        self.series
            .get(&timeframe)
            .cloned()
            .ok_or_else(|| ReplayError::loader(timeframe, "no fixture series"))
    }
}
