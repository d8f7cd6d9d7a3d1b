use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use rewind_core::timeseries::sync;
use rewind_core::{
    Candle, CandleSnapshot, ReadyReport, ReplayError, ReplayEvent, SeriesStore, SessionPhase,
    SessionStatus, SyncStrategy, Timeframe,
};

/// Result of advancing the replay clock once.
#[derive(Debug, Clone, PartialEq)]
pub enum Tick {
    /// Not playing; nothing advanced.
    Heartbeat(SessionPhase),
    /// One primary candle with every coarser timeframe synchronized to it.
    Candle {
        /// Timeframe driving the clock.
        primary: Timeframe,
        /// Primary position that was emitted.
        index: usize,
        /// `index / total * 100`, computed before advancing.
        progress: f64,
        /// Snapshot for every timeframe that resolved a candle.
        candles: BTreeMap<Timeframe, CandleSnapshot>,
    },
    /// The primary series is exhausted; the session is now paused.
    Finished,
}

impl Tick {
    /// Wire events for this tick, in emission order.
    ///
    /// A candle tick yields the multi-timeframe event followed by the flat echo of
    /// the primary candle.
    #[must_use]
    pub fn into_events(self) -> Vec<ReplayEvent> {
        match self {
            Self::Heartbeat(status) => vec![ReplayEvent::Heartbeat { status }],
            Self::Finished => vec![ReplayEvent::finished()],
            Self::Candle {
                primary,
                index,
                progress,
                candles,
            } => {
                let echo = candles.get(&primary).map(|c| ReplayEvent::Candle {
                    timeframe: primary,
                    timestamp: c.timestamp,
                    time: c.timestamp,
                    open: c.open,
                    high: c.high,
                    low: c.low,
                    close: c.close,
                    volume: c.volume,
                    index,
                    progress,
                });
                let mut out = vec![ReplayEvent::MultiTimeframeCandle {
                    primary,
                    index,
                    progress,
                    candles,
                }];
                out.extend(echo);
                out
            }
        }
    }
}

/// Replay session: per-timeframe series and cursors plus playback state.
///
/// A plain state machine with no I/O. The controller serializes access to it and the
/// publisher drives [`SessionState::tick`].
#[derive(Debug, Clone)]
pub struct SessionState {
    phase: SessionPhase,
    date: Option<NaiveDate>,
    speed: f64,
    primary: Option<Timeframe>,
    series: BTreeMap<Timeframe, Arc<[Candle]>>,
    cursors: BTreeMap<Timeframe, usize>,
    strategy: SyncStrategy,
    window: usize,
}

#[allow(clippy::cast_precision_loss)]
fn percent(index: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    index as f64 / total as f64 * 100.0
}

impl SessionState {
    /// Idle session with the given default speed and synchronization settings.
    #[must_use]
    pub const fn new(speed: f64, strategy: SyncStrategy, window: usize) -> Self {
        Self {
            phase: SessionPhase::Idle,
            date: None,
            speed,
            primary: None,
            series: BTreeMap::new(),
            cursors: BTreeMap::new(),
            strategy,
            window,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Current speed in seconds per tick.
    #[must_use]
    pub const fn speed(&self) -> f64 {
        self.speed
    }

    /// Load `date` from `store` and enter `Ready`.
    ///
    /// Any previous session is discarded first, so a failed start leaves the
    /// session idle.
    ///
    /// # Errors
    /// - `DataNotReady` when the store holds no series at all.
    /// - `NoData` when the primary timeframe has no candle on `date`.
    pub fn start(
        &mut self,
        store: &SeriesStore,
        date: NaiveDate,
        speed: f64,
    ) -> Result<ReadyReport, ReplayError> {
        self.stop();
        let primary = store.primary_timeframe().ok_or(ReplayError::DataNotReady)?;
        if store.for_date(primary, date).is_empty() {
            return Err(ReplayError::no_data(date.to_string(), primary));
        }

        for tf in store.timeframes() {
            let day = store.for_date(tf, date);
            if !day.is_empty() {
                self.series.insert(tf, day);
                self.cursors.insert(tf, 0);
            }
        }
        self.phase = SessionPhase::Ready;
        self.date = Some(date);
        self.speed = speed;
        self.primary = Some(primary);

        #[cfg(feature = "tracing")]
        tracing::info!(%date, primary = %primary, total = self.total(), speed, "session ready");

        Ok(ReadyReport {
            date,
            total_candles: self.total(),
            speed,
            primary,
            loaded_timeframes: self.loaded_timeframes(),
        })
    }

    /// Enter `Playing` from `Ready` or `Paused`; a no-op when already playing.
    ///
    /// # Errors
    /// Returns `NotLoaded` when idle.
    pub fn play(&mut self) -> Result<(), ReplayError> {
        self.ensure_loaded()?;
        self.transition(SessionPhase::Playing);
        Ok(())
    }

    /// Enter `Paused`, keeping every cursor.
    ///
    /// # Errors
    /// Returns `NotLoaded` when idle.
    pub fn pause(&mut self) -> Result<(), ReplayError> {
        self.ensure_loaded()?;
        self.transition(SessionPhase::Paused);
        Ok(())
    }

    /// Move the primary cursor to `index`. Coarser cursors catch up on later ticks.
    ///
    /// With the local-window strategy a backward seek past the window leaves coarse
    /// views missing until the clock reaches a candle inside it; the cursor then moves
    /// back to that candle.
    ///
    /// # Errors
    /// - `NotLoaded` when idle.
    /// - `IndexOutOfRange` unless `index < total`.
    pub fn seek(&mut self, index: usize) -> Result<(), ReplayError> {
        let primary = self.ensure_loaded()?;
        let total = self.total();
        if index >= total {
            return Err(ReplayError::IndexOutOfRange { index, total });
        }
        self.cursors.insert(primary, index);

        #[cfg(feature = "tracing")]
        tracing::debug!(index, total, "seek");
        Ok(())
    }

    /// Discard series and cursors and return to `Idle`. Idempotent; the speed is
    /// kept as the default for the next start.
    pub fn stop(&mut self) {
        #[cfg(feature = "tracing")]
        if self.phase.is_loaded() {
            tracing::info!(date = ?self.date, "session stopped");
        }
        self.phase = SessionPhase::Idle;
        self.date = None;
        self.primary = None;
        self.series.clear();
        self.cursors.clear();
    }

    /// Replace the speed; takes effect on the publisher's next wait.
    pub const fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    /// Leave `Playing` after a stream fault.
    pub fn halt(&mut self) {
        if self.phase == SessionPhase::Playing {
            self.transition(SessionPhase::Paused);
        }
    }

    /// Advance the replay clock by one primary candle.
    ///
    /// # Errors
    /// Returns `StreamFault` if a playing session lost its primary series.
    pub fn tick(&mut self) -> Result<Tick, ReplayError> {
        if self.phase != SessionPhase::Playing {
            return Ok(Tick::Heartbeat(self.phase));
        }
        let primary = self
            .primary
            .ok_or_else(|| ReplayError::fault("playing session has no primary timeframe"))?;
        let series = self
            .series
            .get(&primary)
            .cloned()
            .ok_or_else(|| ReplayError::fault(format!("{primary} series missing")))?;

        let index = self.cursors.get(&primary).copied().unwrap_or(0);
        let Some(candle) = series.get(index) else {
            self.transition(SessionPhase::Paused);
            #[cfg(feature = "tracing")]
            tracing::info!(total = series.len(), "replay finished");
            return Ok(Tick::Finished);
        };
        let progress = percent(index, series.len());
        self.cursors.insert(primary, index + 1);

        let mut candles = BTreeMap::new();
        candles.insert(primary, CandleSnapshot::new(primary, index, candle));
        for (tf, s) in &self.series {
            if *tf == primary {
                continue;
            }
            let cursor = self.cursors.get(tf).copied().unwrap_or(0);
            if let Some(p) = sync::resolve(self.strategy, s, *tf, cursor, candle.ts, self.window) {
                // Only a strictly better match moves the cursor. A cursor whose candle
                // opens after the clock (left behind by a backward seek) is no match.
                if p > cursor || s.get(cursor).is_none_or(|c| c.ts > candle.ts) {
                    self.cursors.insert(*tf, p);
                }
                candles.insert(*tf, CandleSnapshot::new(*tf, p, &s[p]));
            }
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(index, ts = candle.ts, timeframes = candles.len(), "tick");

        Ok(Tick::Candle {
            primary,
            index,
            progress,
            candles,
        })
    }

    /// Point-in-time snapshot.
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        let current_index = self
            .primary
            .and_then(|p| self.cursors.get(&p).copied())
            .unwrap_or(0);
        let total = self.total();
        SessionStatus {
            phase: self.phase,
            is_playing: self.phase == SessionPhase::Playing,
            current_date: self.date,
            current_index,
            total_candles: total,
            speed: self.speed,
            progress: percent(current_index, total),
            loaded_timeframes: self.loaded_timeframes(),
            cursors: self.cursors.clone(),
        }
    }

    /// Drop the primary series while keeping the session loaded.
    #[cfg(test)]
    pub(crate) fn forget_primary_series(&mut self) {
        if let Some(p) = self.primary {
            self.series.remove(&p);
        }
    }

    fn total(&self) -> usize {
        self.primary
            .and_then(|p| self.series.get(&p))
            .map_or(0, |s| s.len())
    }

    fn loaded_timeframes(&self) -> Vec<Timeframe> {
        self.series.keys().copied().collect()
    }

    fn ensure_loaded(&self) -> Result<Timeframe, ReplayError> {
        match (self.phase, self.primary) {
            (SessionPhase::Idle, _) | (_, None) => Err(ReplayError::NotLoaded),
            (_, Some(p)) => Ok(p),
        }
    }

    fn transition(&mut self, next: SessionPhase) {
        #[cfg(feature = "tracing")]
        if self.phase != next {
            tracing::info!(from = ?self.phase, to = ?next, "session transition");
        }
        self.phase = next;
    }
}
