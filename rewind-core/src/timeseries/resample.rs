use rewind_types::{Candle, Timeframe};

/// Aggregate a finer series into `timeframe` candles.
///
/// Intraday buckets are aligned to multiples of the timeframe duration since the
/// epoch and stamped with the bucket start. Daily buckets group by UTC calendar date
/// and are stamped with the first constituent candle, so a daily bar carries the
/// session open time rather than midnight.
///
/// Open is the first open, close the last close, high/low the extremes and volume
/// the saturating sum. Input is sorted first; an empty input yields an empty output.
///
/// ```
/// use rewind_core::timeseries::resample::resample;
/// use rewind_types::{Candle, Timeframe};
/// use rust_decimal::Decimal;
///
/// let m1: Vec<Candle> = (0..10)
///     .map(|i| {
///         let (lo, hi) = (Decimal::from(i), Decimal::from(i + 1));
///         Candle::new(i * 60, lo, hi, lo, hi, 10)
///     })
///     .collect();
/// let m5 = resample(&m1, Timeframe::M5);
/// assert_eq!(m5.len(), 2);
/// assert_eq!(m5[1].ts, 300);
/// assert_eq!(m5[1].open, Decimal::from(5));
/// assert_eq!(m5[1].close, Decimal::from(10));
/// assert_eq!(m5[1].volume, 50);
/// ```
#[must_use]
pub fn resample(candles: &[Candle], timeframe: Timeframe) -> Vec<Candle> {
    let d = timeframe.seconds();
    let daily = timeframe == Timeframe::D1;

    let mut sorted = candles.to_vec();
    sorted.sort_by_key(|c| c.ts);

    let mut out: Vec<Candle> = Vec::new();
    let mut cur_key: Option<i64> = None;
    for c in sorted {
        let key = c.ts.div_euclid(d);
        match out.last_mut() {
            Some(agg) if cur_key == Some(key) => {
                agg.high = agg.high.max(c.high);
                agg.low = agg.low.min(c.low);
                agg.close = c.close;
                agg.volume = agg.volume.saturating_add(c.volume);
            }
            _ => {
                let ts = if daily { c.ts } else { key * d };
                out.push(Candle { ts, ..c });
                cur_key = Some(key);
            }
        }
    }
    out
}
