//! Candle pattern detectors.
/// Three-candle fair value gap detection with forward clearance.
pub mod fvg;
