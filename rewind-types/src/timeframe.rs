//! Fixed candle aggregation periods.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ReplayError;

/// Candle aggregation period.
///
/// Variants are declared finest first so the derived `Ord` sorts from the primary
/// replay clock toward the coarsest view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    /// One minute.
    M1,
    /// Five minutes.
    M5,
    /// Fifteen minutes.
    M15,
    /// One hour.
    H1,
    /// Four hours.
    H4,
    /// One trading day.
    D1,
}

impl Timeframe {
    /// Every supported timeframe, finest first.
    pub const ALL: [Self; 6] = [Self::M1, Self::M5, Self::M15, Self::H1, Self::H4, Self::D1];

    /// Fixed duration of one candle in seconds.
    #[must_use]
    pub const fn seconds(self) -> i64 {
        match self {
            Self::M1 => 60,
            Self::M5 => 300,
            Self::M15 => 900,
            Self::H1 => 3_600,
            Self::H4 => 14_400,
            Self::D1 => 86_400,
        }
    }

    /// Fixed duration of one candle in minutes.
    #[must_use]
    pub const fn minutes(self) -> i64 {
        self.seconds() / 60
    }

    /// Canonical label, e.g. `"M15"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::M1 => "M1",
            Self::M5 => "M5",
            Self::M15 => "M15",
            Self::H1 => "H1",
            Self::H4 => "H4",
            Self::D1 => "D1",
        }
    }

    /// Minimum number of candles a date needs in this timeframe to count as a
    /// usable trading day when picking dates at random.
    #[must_use]
    pub const fn min_daily_candles(self) -> usize {
        match self {
            Self::M1 => 20,
            Self::M5 => 15,
            Self::M15 => 10,
            Self::H1 => 5,
            Self::H4 => 3,
            Self::D1 => 1,
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts the canonical labels (`M1`, `h4`, `D1`) and the short form (`1m`, `4h`, `1d`).
impl FromStr for Timeframe {
    type Err = ReplayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tf = match s.trim().to_ascii_lowercase().as_str() {
            "m1" | "1m" => Self::M1,
            "m5" | "5m" => Self::M5,
            "m15" | "15m" => Self::M15,
            "h1" | "1h" | "60m" => Self::H1,
            "h4" | "4h" => Self::H4,
            "d1" | "1d" | "1day" => Self::D1,
            other => {
                return Err(ReplayError::InvalidArg(format!(
                    "unknown timeframe: {other}"
                )));
            }
        };
        Ok(tf)
    }
}
