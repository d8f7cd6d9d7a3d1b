use std::collections::BTreeMap;

use chrono::NaiveDate;
use rewind_core::{Candle, SeriesStore, Timeframe, resample};
use rust_decimal::Decimal;

/// Tuesday 2024-01-02, the first fixture trading day.
pub const DAY_ONE: (i32, u32, u32) = (2024, 1, 2);
/// Wednesday 2024-01-03, the second fixture trading day.
pub const DAY_TWO: (i32, u32, u32) = (2024, 1, 3);
/// Saturday 2024-01-06; no fixture data.
pub const EMPTY_DAY: (i32, u32, u32) = (2024, 1, 6);

/// Minutes in a full regular session.
pub const SESSION_MINUTES: usize = 390;

/// Regular-session open in UTC during standard time (09:30 New York).
const OPEN_UTC_SECONDS: i64 = 14 * 3_600 + 30 * 60;

/// Build a date from one of the fixture tuples.
#[must_use]
pub fn date((y, m, d): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid fixture date")
}

/// Epoch seconds of the regular-session open on `day`.
#[must_use]
pub fn session_open(day: NaiveDate) -> i64 {
    day.and_hms_opt(0, 0, 0)
        .expect("midnight exists")
        .and_utc()
        .timestamp()
        + OPEN_UTC_SECONDS
}

/// `count` one-minute bars from the session open on `day`.
///
/// Prices follow a fixed saw-tooth walk around 100.00 so every run produces the same
/// bars; each bar opens at the previous close.
#[must_use]
pub fn minute_bars(day: NaiveDate, count: usize) -> Vec<Candle> {
    let open_ts = session_open(day);
    let mut prev_close: i64 = 10_000;
    (0..count as i64)
        .map(|i| {
            let step = (i * 7_919).rem_euclid(23) - 11;
            let open = prev_close;
            let close = open + step;
            let high = open.max(close) + i.rem_euclid(5) + 1;
            let low = open.min(close) - i.rem_euclid(3) - 1;
            prev_close = close;
            Candle::new(
                open_ts + i * 60,
                Decimal::new(open, 2),
                Decimal::new(high, 2),
                Decimal::new(low, 2),
                Decimal::new(close, 2),
                1_000 + (i * 131).rem_euclid(500) as u64,
            )
        })
        .collect()
}

/// One trading day in every timeframe, coarser ones aggregated from the minute bars.
#[must_use]
pub fn trading_day(day: NaiveDate, minutes: usize) -> BTreeMap<Timeframe, Vec<Candle>> {
    let m1 = minute_bars(day, minutes);
    let mut out = BTreeMap::new();
    for tf in Timeframe::ALL {
        let series = if tf == Timeframe::M1 {
            m1.clone()
        } else {
            resample(&m1, tf)
        };
        out.insert(tf, series);
    }
    out
}

/// Store holding `minutes` bars per day for each of `days`, in every timeframe.
#[must_use]
pub fn store(days: &[NaiveDate], minutes: usize) -> SeriesStore {
    let mut merged: BTreeMap<Timeframe, Vec<Candle>> = BTreeMap::new();
    for day in days {
        for (tf, series) in trading_day(*day, minutes) {
            merged.entry(tf).or_default().extend(series);
        }
    }
    let mut store = SeriesStore::new();
    for (tf, series) in merged {
        store.insert(tf, series);
    }
    store
}

/// Both fixture days with full sessions.
#[must_use]
pub fn fixture_store() -> SeriesStore {
    store(&[date(DAY_ONE), date(DAY_TWO)], SESSION_MINUTES)
}
