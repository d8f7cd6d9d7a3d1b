//! Shared helpers for candle timestamps and calendar dates.

use chrono::{DateTime, NaiveDate};
use rewind_types::Candle;

const SECONDS_PER_DAY: i64 = 86_400;

/// UTC calendar date of an epoch timestamp, `None` when out of chrono's range.
#[must_use]
pub fn utc_date(ts: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive())
}

/// Half-open `[start, end)` epoch-second bounds of a UTC calendar day.
#[must_use]
pub fn day_bounds(date: NaiveDate) -> (i64, i64) {
    let start = date
        .and_hms_opt(0, 0, 0)
        .map_or(0, |dt| dt.and_utc().timestamp());
    (start, start + SECONDS_PER_DAY)
}

/// Sub-slice of an ascending series whose timestamps fall on `date` (UTC).
#[must_use]
pub fn slice_for_date(candles: &[Candle], date: NaiveDate) -> &[Candle] {
    let (start, end) = day_bounds(date);
    let lo = candles.partition_point(|c| c.ts < start);
    let hi = candles.partition_point(|c| c.ts < end);
    &candles[lo..hi]
}

/// Sort by timestamp and drop duplicate timestamps, keeping the last occurrence.
pub fn sort_dedup_keep_last(candles: &mut Vec<Candle>) {
    // stable: later duplicates stay after earlier ones
    candles.sort_by_key(|c| c.ts);
    let mut out: Vec<Candle> = Vec::with_capacity(candles.len());
    for c in candles.drain(..) {
        match out.last_mut() {
            Some(prev) if prev.ts == c.ts => *prev = c,
            _ => out.push(c),
        }
    }
    *candles = out;
}
