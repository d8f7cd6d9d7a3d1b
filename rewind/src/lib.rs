//! Rewind replays historical candles as a live-feeling event stream.
//!
//! Overview
//! - One session at a time replays a single calendar date. The finest loaded
//!   timeframe drives the clock; every coarser timeframe is synchronized to it on
//!   each tick.
//! - The controller (`Replay`) exposes `start/play/pause/seek/stop/set_speed/status`
//!   and a single-consumer event stream.
//! - Fair value gap detection, continuity and integrity checks run on demand via
//!   `Replay::analyze`, independent of playback.
//!
//! Key behaviors and trade-offs
//! - Speed is the wait in seconds between ticks and must be one of the configured
//!   speeds. A speed change applies from the next wait; pause, seek and stop wake
//!   the stream immediately.
//! - Synchronization: `LocalWindow` (default) inspects a few positions around each
//!   timeframe's cursor and may lag after a long seek; `BinarySearch` is exact.
//! - Opening a stream, starting a session or stopping ends any running stream.
//!
//! Examples
//! ```rust,ignore
//! use rewind::{Replay, ReplayEvent, sse_frame};
//!
//! let replay = Replay::builder().with_store(store).build()?;
//! replay.start(date, Some(1.0)).await?;
//! let (handle, mut rx) = replay.stream().await?;
//! replay.play().await?;
//! while let Some(ev) = rx.recv().await {
//!     print!("{}", sse_frame(&ev)?);
//!     if ev.is_terminal() {
//!         break;
//!     }
//! }
//! handle.stop().await;
//! ```
//!
//! See `rewind/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
/// Session state machine, control broadcast and publishing task.
pub mod session;

pub use core::{Replay, ReplayBuilder};
pub use session::frame::sse_frame;
pub use session::state::{SessionState, Tick};

// Re-export core types for convenience
pub use rewind_core::{
    AnalysisReport, Candle, CandleSnapshot, ContinuityGap, ContinuityReport, FairValueGap,
    FvgConfig, GapKind, GapStatus, HolidayInfo, IntegrityIssue, IntegrityReport, LoadProgress,
    MarketCalendar, MarketHours, ReadyReport, ReplayConfig, ReplayError, ReplayEvent,
    SeriesLoader, SeriesStore, SessionPhase, SessionStatus, StreamHandle, SyncStrategy,
    Timeframe, TradingStatus, load_store,
};
