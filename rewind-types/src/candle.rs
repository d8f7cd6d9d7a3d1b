use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One OHLCV bar.
///
/// `ts` is the bar's open time in seconds since the Unix epoch. Prices serialize as
/// JSON numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candle {
    /// Bar open time, seconds since epoch.
    pub ts: i64,
    /// Opening price.
    pub open: Decimal,
    /// Highest traded price.
    pub high: Decimal,
    /// Lowest traded price.
    pub low: Decimal,
    /// Closing price.
    pub close: Decimal,
    /// Traded volume.
    pub volume: u64,
}

impl Candle {
    /// Build a candle from its parts.
    #[must_use]
    pub const fn new(
        ts: i64,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: u64,
    ) -> Self {
        Self {
            ts,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Synthetic flat bar at `ts` carrying `price` in every OHLC field and no volume.
    #[must_use]
    pub const fn flat(ts: i64, price: Decimal) -> Self {
        Self::new(ts, price, price, price, price, 0)
    }

    /// `true` when `low ≤ min(open, close) ≤ max(open, close) ≤ high`.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        let body_low = self.open.min(self.close);
        let body_high = self.open.max(self.close);
        self.low <= body_low && body_high <= self.high
    }

    /// `true` when the bar closed above its open.
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// `true` when the bar closed below its open.
    #[must_use]
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }
}
