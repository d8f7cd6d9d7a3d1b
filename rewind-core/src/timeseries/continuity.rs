use rewind_types::{
    Candle, ContinuityGap, ContinuityReport, IntegrityIssue, IntegrityReport, Timeframe,
};

/// Flag every consecutive pair whose spacing exceeds 1.5× the timeframe duration.
///
/// Empty and single-candle series are continuous. The series is only read.
///
/// ```
/// use rewind_core::check_continuity;
/// use rewind_types::{Candle, Timeframe};
/// use rust_decimal::Decimal;
///
/// let at = |ts: i64| Candle::flat(ts, Decimal::ONE);
/// // 60s spacing with one 180s hole between 120 and 300.
/// let candles = vec![at(0), at(60), at(120), at(300), at(360)];
/// let report = check_continuity(&candles, Timeframe::M1);
/// assert!(!report.is_continuous);
/// assert_eq!(report.total_gaps, 1);
/// assert_eq!(report.gaps[0].index, 2);
/// assert_eq!(report.gaps[0].gap_minutes, 3);
/// ```
#[must_use]
pub fn check_continuity(candles: &[Candle], timeframe: Timeframe) -> ContinuityReport {
    let spacing = timeframe.seconds();
    let gaps = candles
        .windows(2)
        .enumerate()
        .filter_map(|(i, w)| {
            let delta = w[1].ts - w[0].ts;
            // delta > 1.5 * spacing
            (2 * delta > 3 * spacing).then_some(ContinuityGap {
                index: i,
                from_time: w[0].ts,
                to_time: w[1].ts,
                gap_seconds: delta,
                gap_minutes: delta / 60,
            })
        })
        .collect();
    ContinuityReport::from_gaps(gaps)
}

/// Return a copy of `candles` with synthetic bars inserted into every hole.
///
/// For each consecutive pair, bars are added at `prev.ts + k * spacing` while the
/// slot still leaves a full period before the next real bar. Synthetic bars are flat
/// at the previous close with zero volume. Input order is trusted.
#[must_use]
pub fn fill_missing_candles(candles: &[Candle], timeframe: Timeframe) -> Vec<Candle> {
    let spacing = timeframe.seconds();
    let mut out = Vec::with_capacity(candles.len());
    for (i, c) in candles.iter().enumerate() {
        if let Some(prev) = i.checked_sub(1).map(|p| &candles[p]) {
            let mut slot = prev.ts + spacing;
            while slot + spacing <= c.ts {
                out.push(Candle::flat(slot, prev.close));
                slot += spacing;
            }
        }
        out.push(*c);
    }
    out
}

/// OHLCV sanity pass: empty series, inverted ranges, bodies outside the range and
/// timestamps that fail to increase.
#[must_use]
pub fn validate_integrity(candles: &[Candle]) -> IntegrityReport {
    let mut issues = Vec::new();
    if candles.is_empty() {
        issues.push(IntegrityIssue::Empty);
    }
    for (index, c) in candles.iter().enumerate() {
        if c.high < c.low {
            issues.push(IntegrityIssue::HighBelowLow { index });
        } else if !c.is_well_formed() {
            issues.push(IntegrityIssue::InvalidOhlc { index });
        }
        if index > 0 && c.ts <= candles[index - 1].ts {
            issues.push(IntegrityIssue::NonIncreasingTimestamps { index });
        }
    }
    IntegrityReport {
        valid: issues.is_empty(),
        issues,
    }
}
