use rewind_types::{Candle, FairValueGap, FvgConfig, GapKind, GapStatus};

/// Detect three-candle fair value gaps with the default parameters.
///
/// Shorthand for `FvgDetector::default().detect(candles)`.
///
/// ```
/// use rewind_core::detect_fair_value_gaps;
/// use rewind_types::{Candle, GapKind};
/// use rust_decimal::Decimal;
///
/// let bar = |ts: i64, o: i64, h: i64, l: i64, c: i64| {
///     Candle::new(ts, Decimal::from(o), Decimal::from(h), Decimal::from(l), Decimal::from(c), 0)
/// };
/// // Middle bar closes above the left high, right low stays above the left high.
/// let candles = vec![
///     bar(0, 100, 101, 99, 100),
///     bar(60, 100, 106, 100, 105),
///     bar(120, 105, 107, 103, 106),
/// ];
/// let gaps = detect_fair_value_gaps(&candles);
/// assert_eq!(gaps.len(), 1);
/// assert_eq!(gaps[0].kind, GapKind::Bullish);
/// assert_eq!(gaps[0].bottom_price, Decimal::from(101));
/// assert_eq!(gaps[0].top_price, Decimal::from(103));
/// ```
#[must_use]
pub fn detect_fair_value_gaps(candles: &[Candle]) -> Vec<FairValueGap> {
    FvgDetector::default().detect(candles)
}

/// Fair value gap scanner.
///
/// For every confirmation index `i ≥ 2`, the candles `L = s[i-2]`, `M = s[i-1]` and
/// `R = s[i]` form a bullish gap when `M` closes up through `L.high` and `R.low`
/// stays above `L.high`; bearish symmetrically against `L.low`. Overlapping gaps at
/// adjacent indices are all reported.
///
/// Behavior and trade-offs:
/// - Clearance is computed once at detection time by looking `max_lookback`
///   candles ahead; callers re-run detection to refresh it.
/// - Fewer than three candles yield an empty result rather than an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct FvgDetector {
    config: FvgConfig,
}

impl FvgDetector {
    /// Create a detector with explicit parameters.
    #[must_use]
    pub const fn new(config: FvgConfig) -> Self {
        Self { config }
    }

    /// Parameters in use.
    #[must_use]
    pub const fn config(&self) -> FvgConfig {
        self.config
    }

    /// Scan `candles` (ascending by time) and return every gap in detection order.
    #[must_use]
    pub fn detect(&self, candles: &[Candle]) -> Vec<FairValueGap> {
        let len = candles.len();
        if len < 3 {
            return Vec::new();
        }
        let last = len - 1;

        let mut out = Vec::new();
        for (offset, w) in candles.windows(3).enumerate() {
            let (left, middle, right) = (&w[0], &w[1], &w[2]);
            let i = offset + 2;

            let (kind, top_price, bottom_price) = if middle.is_bullish()
                && middle.close > left.high
                && left.high < right.low
            {
                (GapKind::Bullish, right.low, left.high)
            } else if middle.is_bearish() && middle.close < left.low && left.low > right.high {
                (GapKind::Bearish, left.low, right.high)
            } else {
                continue;
            };

            let end_idx = (offset + self.config.display_horizon).min(last);
            let mut gap = FairValueGap {
                kind,
                top_price,
                bottom_price,
                start_time: left.ts,
                end_time: candles[end_idx].ts,
                detection_index: i,
                left_index: offset,
                middle_index: offset + 1,
                status: GapStatus::Valid,
                cleared_index: None,
            };
            if let Some(idx) = self.check_cleared(candles, &gap) {
                gap.status = GapStatus::Cleared;
                gap.cleared_index = Some(idx);
            }

            #[cfg(feature = "tracing")]
            tracing::debug!(
                kind = ?gap.kind,
                detection_index = gap.detection_index,
                top = %gap.top_price,
                bottom = %gap.bottom_price,
                cleared = gap.is_cleared(),
                "fair value gap"
            );
            out.push(gap);
        }

        #[cfg(feature = "tracing")]
        {
            let bullish = out.iter().filter(|g| g.kind == GapKind::Bullish).count();
            let valid = out.iter().filter(|g| !g.is_cleared()).count();
            tracing::info!(
                candles = len,
                bullish,
                bearish = out.len() - bullish,
                valid,
                "fair value gap scan complete"
            );
        }
        out
    }

    /// Absolute index of the first candle after detection whose close crosses back
    /// through the gap, looking at most `max_lookback` candles ahead.
    ///
    /// Bullish gaps clear on a close below `bottom_price` (the left high); bearish
    /// gaps on a close above `top_price` (the left low).
    #[must_use]
    pub fn check_cleared(&self, candles: &[Candle], gap: &FairValueGap) -> Option<usize> {
        let from = gap.detection_index + 1;
        let to = (gap.detection_index + self.config.max_lookback)
            .min(candles.len().saturating_sub(1));
        if from > to {
            return None;
        }
        (from..=to).find(|&j| {
            let close = candles[j].close;
            match gap.kind {
                GapKind::Bullish => close < gap.bottom_price,
                GapKind::Bearish => close > gap.top_price,
            }
        })
    }
}
