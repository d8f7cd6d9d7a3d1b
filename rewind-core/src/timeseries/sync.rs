//! Resolve the candle of a coarser timeframe that corresponds to a primary timestamp.
//!
//! A coarse candle opening at `ts` with duration `d` contains `t` when
//! `ts ≤ t < ts + d`. When no candle contains `t`, the latest candle opening at or
//! before `t` is used instead.

use rewind_types::{Candle, SyncStrategy, Timeframe};

/// Resolve `t` in `series` with the selected strategy.
///
/// `cursor` is the timeframe's previous position and only matters for
/// [`SyncStrategy::LocalWindow`], which inspects `cursor - window ..= cursor + window`.
#[must_use]
pub fn resolve(
    strategy: SyncStrategy,
    series: &[Candle],
    timeframe: Timeframe,
    cursor: usize,
    t: i64,
    window: usize,
) -> Option<usize> {
    match strategy {
        SyncStrategy::LocalWindow => local_window(series, timeframe, cursor, t, window),
        SyncStrategy::BinarySearch => binary_search(series, t),
    }
}

/// Bounded search around `cursor`.
///
/// The first position in the window whose period contains `t` wins; otherwise the
/// largest timestamp `≤ t` seen in the window. After a long jump of the primary
/// clock the true candle may sit outside the window, in which case the result lags
/// until subsequent ticks walk the cursor forward.
#[must_use]
pub fn local_window(
    series: &[Candle],
    timeframe: Timeframe,
    cursor: usize,
    t: i64,
    window: usize,
) -> Option<usize> {
    let last = series.len().checked_sub(1)?;
    let lo = cursor.saturating_sub(window).min(last);
    let hi = cursor.saturating_add(window).min(last);
    let d = timeframe.seconds();

    let mut best: Option<usize> = None;
    for (p, c) in series.iter().enumerate().take(hi + 1).skip(lo) {
        if c.ts <= t && t < c.ts + d {
            return Some(p);
        }
        if c.ts <= t && best.is_none_or(|b| series[b].ts < c.ts) {
            best = Some(p);
        }
    }
    best
}

/// Partition-point search over the whole series: the last candle opening at or
/// before `t`.
#[must_use]
pub fn binary_search(series: &[Candle], t: i64) -> Option<usize> {
    series.partition_point(|c| c.ts <= t).checked_sub(1)
}
