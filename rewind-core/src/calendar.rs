//! US equity market calendar: regular session hours, DST and exchange holidays.
//!
//! The regular session runs 09:30–16:00 America/New_York. Holiday and early-close
//! tables cover 2019 through 2024; dates in other years are treated as normal
//! trading days.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Offset, TimeZone, Utc, Weekday};
use chrono_tz::America::New_York;
use chrono_tz::Tz;
use rewind_types::{Candle, ReplayError};
use serde::{Deserialize, Serialize};

const HOLIDAYS: &[(i32, u32, u32)] = &[
    // 2019
    (2019, 1, 1),
    (2019, 1, 21),
    (2019, 2, 18),
    (2019, 4, 19),
    (2019, 5, 27),
    (2019, 7, 4),
    (2019, 9, 2),
    (2019, 11, 28),
    (2019, 12, 25),
    // 2020
    (2020, 1, 1),
    (2020, 1, 20),
    (2020, 2, 17),
    (2020, 4, 10),
    (2020, 5, 25),
    (2020, 7, 3),
    (2020, 9, 7),
    (2020, 11, 26),
    (2020, 12, 25),
    // 2021
    (2021, 1, 1),
    (2021, 1, 18),
    (2021, 2, 15),
    (2021, 4, 2),
    (2021, 5, 31),
    (2021, 7, 5),
    (2021, 9, 6),
    (2021, 11, 25),
    (2021, 12, 24),
    // 2022: New Year's Day fell on a Saturday with no weekday observance
    (2022, 1, 17),
    (2022, 2, 21),
    (2022, 4, 15),
    (2022, 5, 30),
    (2022, 6, 20),
    (2022, 7, 4),
    (2022, 9, 5),
    (2022, 11, 24),
    (2022, 12, 26),
    // 2023
    (2023, 1, 2),
    (2023, 1, 16),
    (2023, 2, 20),
    (2023, 4, 7),
    (2023, 5, 29),
    (2023, 6, 19),
    (2023, 7, 4),
    (2023, 9, 4),
    (2023, 11, 23),
    (2023, 12, 25),
    // 2024
    (2024, 1, 1),
    (2024, 1, 15),
    (2024, 2, 19),
    (2024, 3, 29),
    (2024, 5, 27),
    (2024, 6, 19),
    (2024, 7, 4),
    (2024, 9, 2),
    (2024, 11, 28),
    (2024, 12, 25),
];

const EARLY_CLOSES: &[(i32, u32, u32)] = &[
    (2019, 7, 3),
    (2019, 11, 29),
    (2019, 12, 24),
    (2020, 11, 27),
    (2020, 12, 24),
    (2021, 11, 26),
    (2022, 11, 25),
    (2023, 7, 3),
    (2023, 11, 24),
    (2024, 7, 3),
    (2024, 11, 29),
    (2024, 12, 24),
];

/// Classification of a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradingStatus {
    /// Exchange holiday.
    MarketClosed,
    /// Session ends early.
    EarlyClose,
    /// Regular session.
    NormalTrading,
}

/// Holiday lookup result for one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayInfo {
    /// Listed exchange holiday.
    pub is_holiday: bool,
    /// Listed early-close day.
    pub is_early_close: bool,
    /// Combined classification; holidays take precedence.
    pub status: TradingStatus,
}

/// Regular session bounds rendered in a display timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketHours {
    /// 09:30 New York.
    pub open: DateTime<Tz>,
    /// 16:00 New York.
    pub close: DateTime<Tz>,
    /// New York observes daylight saving time at the open.
    pub is_dst: bool,
}

/// Table-driven US market calendar.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarketCalendar;

fn in_table(table: &[(i32, u32, u32)], date: NaiveDate) -> bool {
    table
        .iter()
        .any(|&(y, m, d)| date.year() == y && date.month() == m && date.day() == d)
}

fn ny_local(date: NaiveDate, h: u32, m: u32) -> Result<DateTime<Tz>, ReplayError> {
    let time = NaiveTime::from_hms_opt(h, m, 0)
        .ok_or_else(|| ReplayError::InvalidArg(format!("invalid time {h:02}:{m:02}")))?;
    New_York
        .from_local_datetime(&date.and_time(time))
        .earliest()
        .ok_or_else(|| {
            ReplayError::InvalidArg(format!("{date} {h:02}:{m:02} does not exist in New York"))
        })
}

impl MarketCalendar {
    /// Regular session for `date`, converted to `display_tz`.
    ///
    /// # Errors
    /// Returns `InvalidArg` if 09:30 or 16:00 does not exist on `date` in New York.
    pub fn market_hours(
        &self,
        date: NaiveDate,
        display_tz: Tz,
    ) -> Result<MarketHours, ReplayError> {
        let open = ny_local(date, 9, 30)?;
        let close = ny_local(date, 16, 0)?;
        Ok(MarketHours {
            open: open.with_timezone(&display_tz),
            close: close.with_timezone(&display_tz),
            is_dst: Self::ny_is_dst(&open),
        })
    }

    /// Returns true when New York observes daylight saving time at `ts` (epoch seconds).
    #[must_use]
    pub fn is_dst(&self, ts: i64) -> bool {
        DateTime::<Utc>::from_timestamp(ts, 0)
            .is_some_and(|utc| Self::ny_is_dst(&utc.with_timezone(&New_York)))
    }

    fn ny_is_dst(at: &DateTime<Tz>) -> bool {
        // EST is UTC-5; anything else in New York is daylight time
        at.offset().fix().local_minus_utc() != -5 * 3_600
    }

    /// Listed exchange holiday.
    #[must_use]
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        in_table(HOLIDAYS, date)
    }

    /// Listed early-close day.
    #[must_use]
    pub fn is_early_close(&self, date: NaiveDate) -> bool {
        in_table(EARLY_CLOSES, date)
    }

    /// Holiday classification for `date`.
    #[must_use]
    pub fn holiday_info(&self, date: NaiveDate) -> HolidayInfo {
        let is_holiday = self.is_holiday(date);
        let is_early_close = self.is_early_close(date);
        let status = if is_holiday {
            TradingStatus::MarketClosed
        } else if is_early_close {
            TradingStatus::EarlyClose
        } else {
            TradingStatus::NormalTrading
        };
        HolidayInfo {
            is_holiday,
            is_early_close,
            status,
        }
    }

    /// First date after `date` that is neither a weekend nor a listed holiday.
    #[must_use]
    pub fn next_trading_day(&self, date: NaiveDate) -> NaiveDate {
        let mut next = date + Duration::days(1);
        while matches!(next.weekday(), Weekday::Sat | Weekday::Sun) || self.is_holiday(next) {
            next += Duration::days(1);
        }
        next
    }

    /// Returns true when `ts` falls inside 09:30–16:00 New York, both ends included.
    #[must_use]
    pub fn is_regular_session(&self, ts: i64) -> bool {
        let Some(utc) = DateTime::<Utc>::from_timestamp(ts, 0) else {
            return false;
        };
        let local = utc.with_timezone(&New_York).time();
        let open = NaiveTime::from_hms_opt(9, 30, 0);
        let close = NaiveTime::from_hms_opt(16, 0, 0);
        matches!((open, close), (Some(o), Some(c)) if o <= local && local <= c)
    }

    /// Keep only candles inside the regular session.
    #[must_use]
    pub fn filter_regular_session(&self, candles: &[Candle]) -> Vec<Candle> {
        candles
            .iter()
            .filter(|c| self.is_regular_session(c.ts))
            .copied()
            .collect()
    }
}
