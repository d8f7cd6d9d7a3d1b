//! Shared candle, timeframe, event and configuration types for the rewind replay engine.
#![warn(missing_docs)]

mod analysis;
mod candle;
mod config;
mod error;
mod events;
mod reports;
mod timeframe;

pub use analysis::{
    ContinuityGap, ContinuityReport, FairValueGap, GapKind, GapStatus, IntegrityIssue,
    IntegrityReport,
};
pub use candle::Candle;
pub use config::{FvgConfig, ReplayConfig, SyncStrategy};
pub use error::ReplayError;
pub use events::{CandleSnapshot, ReplayEvent};
pub use reports::{AnalysisReport, LoadProgress, ReadyReport, SessionPhase, SessionStatus};
pub use timeframe::Timeframe;
