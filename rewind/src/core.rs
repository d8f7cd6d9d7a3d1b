use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use rand::Rng;
use rewind_core::{
    AnalysisReport, FvgConfig, FvgDetector, ReadyReport, ReplayConfig, ReplayError, ReplayEvent,
    SeriesStore, SessionStatus, StreamHandle, SyncStrategy, Timeframe, check_continuity,
    validate_integrity,
};
use tokio::sync::{Mutex, mpsc, watch};

use crate::session::control::{Command, ControlSignal};
use crate::session::publisher::Publisher;
use crate::session::state::SessionState;

/// Replay controller: one live session over a shared series store.
///
/// Every command takes the session lock for a short, non-blocking critical section
/// and broadcasts a control change before releasing it, so a running stream reacts
/// without waiting out its current sleep and observes commands in order.
pub struct Replay {
    store: Arc<SeriesStore>,
    cfg: ReplayConfig,
    state: Arc<Mutex<SessionState>>,
    control: watch::Sender<ControlSignal>,
}

/// Builder for constructing a `Replay` controller with custom configuration.
pub struct ReplayBuilder {
    store: Option<Arc<SeriesStore>>,
    cfg: ReplayConfig,
}

impl Default for ReplayBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplayBuilder {
    /// Create a new builder with default configuration.
    ///
    /// Behavior and trade-offs:
    /// - Starts without a store; you must supply one via [`ReplayBuilder::with_store`].
    /// - Defaults: speeds {0.5, 1, 2, 3, 5, 10} seconds per tick at 1s, 1s heartbeats,
    ///   local-window synchronization of half-width 2, 40-candle gap lookback.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: None,
            cfg: ReplayConfig::default(),
        }
    }

    /// Use `store` as the replay source.
    #[must_use]
    pub fn with_store(mut self, store: impl Into<Arc<SeriesStore>>) -> Self {
        self.store = Some(store.into());
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: ReplayConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Set the accepted playback speeds, in seconds per tick.
    #[must_use]
    pub fn allowed_speeds(mut self, speeds: &[f64]) -> Self {
        self.cfg.allowed_speeds = speeds.to_vec();
        self
    }

    /// Set the speed used when `start` is called without one.
    ///
    /// Must be one of the allowed speeds; checked by [`ReplayBuilder::build`].
    #[must_use]
    pub const fn default_speed(mut self, speed: f64) -> Self {
        self.cfg.default_speed = speed;
        self
    }

    /// Set the wait between heartbeats while not playing.
    ///
    /// Behavior and trade-offs:
    /// - Control changes cut the wait short, so a long interval does not delay
    ///   `play`; it only thins out keep-alive traffic.
    #[must_use]
    pub const fn heartbeat_interval(mut self, interval: Duration) -> Self {
        self.cfg.heartbeat_interval = interval;
        self
    }

    /// Set the event channel capacity handed to stream consumers.
    ///
    /// Behavior and trade-offs:
    /// - A full channel applies backpressure to the publisher; ticks are delayed,
    ///   never dropped.
    #[must_use]
    pub const fn event_buffer(mut self, capacity: usize) -> Self {
        self.cfg.event_buffer = capacity;
        self
    }

    /// Select the timeframe synchronization algorithm.
    ///
    /// Behavior and trade-offs:
    /// - `LocalWindow` does constant work per tick but coarse views can lag for a few
    ///   ticks after a long seek.
    /// - `BinarySearch` is always exact at `O(log n)` per timeframe per tick.
    #[must_use]
    pub const fn sync_strategy(mut self, strategy: SyncStrategy) -> Self {
        self.cfg.sync_strategy = strategy;
        self
    }

    /// Set the half-width of the local synchronization window.
    #[must_use]
    pub const fn sync_window(mut self, window: usize) -> Self {
        self.cfg.sync_window = window;
        self
    }

    /// Set fair value gap detector parameters used by [`Replay::analyze`].
    #[must_use]
    pub const fn fvg(mut self, fvg: FvgConfig) -> Self {
        self.cfg.fvg = fvg;
        self
    }

    /// Build the `Replay` controller.
    ///
    /// # Errors
    /// Returns `InvalidArg` when no store was supplied, the speed set is empty or
    /// holds a non-positive or non-finite value, the default speed is not allowed, or
    /// the event buffer is zero.
    pub fn build(self) -> Result<Replay, ReplayError> {
        let store = self
            .store
            .ok_or_else(|| ReplayError::InvalidArg("a series store is required".into()))?;
        let cfg = self.cfg;
        if cfg.allowed_speeds.is_empty() {
            return Err(ReplayError::InvalidArg("allowed speeds must not be empty".into()));
        }
        if let Some(bad) = cfg
            .allowed_speeds
            .iter()
            .find(|s| !s.is_finite() || **s <= 0.0)
        {
            return Err(ReplayError::InvalidArg(format!(
                "speed must be positive and finite: {bad}"
            )));
        }
        if !cfg.is_allowed_speed(cfg.default_speed) {
            return Err(ReplayError::InvalidArg(format!(
                "default speed {} is not an allowed speed",
                cfg.default_speed
            )));
        }
        if cfg.event_buffer == 0 {
            return Err(ReplayError::InvalidArg("event buffer must be non-zero".into()));
        }

        let state = SessionState::new(cfg.default_speed, cfg.sync_strategy, cfg.sync_window);
        let (control, _) = watch::channel(ControlSignal::default());
        Ok(Replay {
            store,
            cfg,
            state: Arc::new(Mutex::new(state)),
            control,
        })
    }
}

impl Replay {
    /// Start building a new `Replay` controller.
    #[must_use]
    pub fn builder() -> ReplayBuilder {
        ReplayBuilder::new()
    }

    /// Configuration in effect.
    #[must_use]
    pub const fn config(&self) -> &ReplayConfig {
        &self.cfg
    }

    /// Series store backing every session.
    #[must_use]
    pub fn store(&self) -> &SeriesStore {
        &self.store
    }

    fn check_speed(&self, speed: f64) -> Result<f64, ReplayError> {
        if self.cfg.is_allowed_speed(speed) {
            Ok(speed)
        } else {
            Err(ReplayError::InvalidSpeed { speed })
        }
    }

    fn notify(&self, command: Command) {
        self.control.send_modify(|c| match command {
            Command::Start | Command::Stop | Command::Stream => c.supersede(command),
            _ => c.touch(command),
        });
    }

    /// Load `date` and enter `Ready`, discarding any previous session and ending any
    /// running stream.
    ///
    /// `speed` defaults to the current session speed.
    ///
    /// # Errors
    /// - `InvalidSpeed` when `speed` is not allowed; nothing changes.
    /// - `NoData` when the primary timeframe has no candle on `date`; the session is
    ///   left idle.
    pub async fn start(
        &self,
        date: NaiveDate,
        speed: Option<f64>,
    ) -> Result<ReadyReport, ReplayError> {
        let mut guard = self.state.lock().await;
        let speed = self.check_speed(speed.unwrap_or_else(|| guard.speed()))?;
        let res = guard.start(&self.store, date, speed);
        self.notify(Command::Start);
        res
    }

    /// Start a session on a random usable date.
    ///
    /// # Errors
    /// Returns `DataNotReady` when the store has no usable date, otherwise as
    /// [`Replay::start`].
    pub async fn start_random(&self, speed: Option<f64>) -> Result<ReadyReport, ReplayError> {
        let date = self
            .random_date(&mut rand::rng())
            .ok_or(ReplayError::DataNotReady)?;
        self.start(date, speed).await
    }

    /// Resume or begin playback.
    ///
    /// # Errors
    /// Returns `NotLoaded` when no session is loaded.
    pub async fn play(&self) -> Result<(), ReplayError> {
        let mut guard = self.state.lock().await;
        guard.play()?;
        self.notify(Command::Play);
        Ok(())
    }

    /// Halt playback, keeping every cursor.
    ///
    /// # Errors
    /// Returns `NotLoaded` when no session is loaded.
    pub async fn pause(&self) -> Result<SessionStatus, ReplayError> {
        let mut guard = self.state.lock().await;
        guard.pause()?;
        self.notify(Command::Pause);
        Ok(guard.status())
    }

    /// Move the primary cursor.
    ///
    /// # Errors
    /// `NotLoaded` when idle; `IndexOutOfRange` unless `index < total`.
    pub async fn seek(&self, index: usize) -> Result<(), ReplayError> {
        let mut guard = self.state.lock().await;
        guard.seek(index)?;
        self.notify(Command::Seek);
        Ok(())
    }

    /// Discard the session and end any running stream. Idempotent.
    pub async fn stop(&self) {
        let mut guard = self.state.lock().await;
        guard.stop();
        self.notify(Command::Stop);
    }

    /// Change playback speed; the running stream applies it from its next wait.
    ///
    /// # Errors
    /// Returns `InvalidSpeed` when `speed` is not allowed; the current speed is kept.
    pub async fn set_speed(&self, speed: f64) -> Result<(), ReplayError> {
        let speed = self.check_speed(speed)?;
        let mut guard = self.state.lock().await;
        guard.set_speed(speed);
        self.notify(Command::Speed);
        Ok(())
    }

    /// Current session snapshot.
    pub async fn status(&self) -> SessionStatus {
        self.state.lock().await.status()
    }

    /// Open the event stream for the loaded session.
    ///
    /// Behavior and trade-offs:
    /// - Single consumer: opening a stream ends any stream opened earlier.
    /// - The stream ends after `finished`, after an `error`, on `stop`, on a new
    ///   `start`, when the handle is stopped or dropped, or when the receiver is
    ///   dropped.
    ///
    /// # Errors
    /// Returns `NotLoaded` when no session is loaded.
    pub async fn stream(
        &self,
    ) -> Result<(StreamHandle, mpsc::Receiver<ReplayEvent>), ReplayError> {
        let guard = self.state.lock().await;
        if !guard.phase().is_loaded() {
            return Err(ReplayError::NotLoaded);
        }
        self.notify(Command::Stream);
        let control = self.control.subscribe();
        let generation = control.borrow().generation;
        drop(guard);

        let (tx, rx) = mpsc::channel(self.cfg.event_buffer);
        let handle = Publisher::new(
            Arc::clone(&self.state),
            control,
            generation,
            tx,
            self.cfg.heartbeat_interval,
        )
        .spawn();
        Ok((handle, rx))
    }

    /// Fair value gaps, continuity and integrity of `timeframe` on `date`.
    ///
    /// Independent of playback state.
    ///
    /// # Errors
    /// Returns `NoData` when `timeframe` has no candle on `date`.
    pub fn analyze(
        &self,
        timeframe: Timeframe,
        date: NaiveDate,
    ) -> Result<AnalysisReport, ReplayError> {
        let candles = self.store.for_date(timeframe, date);
        if candles.is_empty() {
            return Err(ReplayError::no_data(date.to_string(), timeframe));
        }
        Ok(AnalysisReport {
            timeframe,
            date,
            candle_count: candles.len(),
            fair_value_gaps: FvgDetector::new(self.cfg.fvg).detect(&candles),
            continuity: check_continuity(&candles, timeframe),
            integrity: validate_integrity(&candles),
        })
    }

    /// A random date usable in every timeframe, falling back to the primary
    /// timeframe's dates.
    pub fn random_date<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<NaiveDate> {
        self.store.random_common_date(rng)
    }
}
