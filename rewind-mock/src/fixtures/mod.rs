//! Deterministic candle fixtures.
/// Hand-written candle rows with known fair value gaps.
pub mod patterns;
/// Synthetic regular-session trading days across every timeframe.
pub mod session;
