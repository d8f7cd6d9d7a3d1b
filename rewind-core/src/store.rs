//! In-memory store holding one ordered candle series per timeframe.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::NaiveDate;
use rand::Rng;
use rand::seq::IndexedRandom;
use rewind_types::{Candle, Timeframe};

use crate::timeseries::util::{slice_for_date, sort_dedup_keep_last, utc_date};

/// Read-mostly holder of every loaded series.
///
/// Series are kept sorted by timestamp with unique timestamps. Slices handed out by
/// [`SeriesStore::for_date`] are shared `Arc<[Candle]>` values, so sessions never copy
/// or mutate the underlying data.
#[derive(Debug, Clone, Default)]
pub struct SeriesStore {
    series: BTreeMap<Timeframe, Arc<[Candle]>>,
}

impl SeriesStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the series for `timeframe`.
    ///
    /// Input order is not trusted: candles are sorted by timestamp and duplicate
    /// timestamps collapse to the last one supplied. Empty input removes the series.
    pub fn insert(&mut self, timeframe: Timeframe, mut candles: Vec<Candle>) {
        if candles.is_empty() {
            self.series.remove(&timeframe);
            return;
        }
        sort_dedup_keep_last(&mut candles);
        self.series.insert(timeframe, Arc::from(candles));
    }

    /// Builder-style [`SeriesStore::insert`].
    #[must_use]
    pub fn with_series(mut self, timeframe: Timeframe, candles: Vec<Candle>) -> Self {
        self.insert(timeframe, candles);
        self
    }

    /// Full series for `timeframe`; empty when none was loaded.
    #[must_use]
    pub fn series(&self, timeframe: Timeframe) -> &[Candle] {
        match self.series.get(&timeframe) {
            Some(s) => s.as_ref(),
            None => &[],
        }
    }

    /// Candles of `timeframe` whose UTC calendar date equals `date`, ascending.
    #[must_use]
    pub fn for_date(&self, timeframe: Timeframe, date: NaiveDate) -> Arc<[Candle]> {
        Arc::from(slice_for_date(self.series(timeframe), date))
    }

    /// Timeframes holding at least one candle, finest first.
    #[must_use]
    pub fn timeframes(&self) -> Vec<Timeframe> {
        self.series.keys().copied().collect()
    }

    /// Finest timeframe present; drives the replay clock.
    #[must_use]
    pub fn primary_timeframe(&self) -> Option<Timeframe> {
        self.series.keys().next().copied()
    }

    /// Returns true when no series is loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Distinct UTC dates on which `timeframe` has at least `min` candles, ascending.
    #[must_use]
    pub fn dates_with_min_candles(&self, timeframe: Timeframe, min: usize) -> Vec<NaiveDate> {
        let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        for c in self.series(timeframe) {
            if let Some(d) = utc_date(c.ts) {
                *counts.entry(d).or_default() += 1;
            }
        }
        counts
            .into_iter()
            .filter(|&(_, n)| n >= min)
            .map(|(d, _)| d)
            .collect()
    }

    /// Dates usable for every loaded timeframe, using each timeframe's
    /// [`Timeframe::min_daily_candles`] threshold.
    #[must_use]
    pub fn common_dates(&self) -> Vec<NaiveDate> {
        let mut common: Option<BTreeSet<NaiveDate>> = None;
        for tf in self.series.keys() {
            let dates: BTreeSet<NaiveDate> = self
                .dates_with_min_candles(*tf, tf.min_daily_candles())
                .into_iter()
                .collect();
            common = Some(match common {
                None => dates,
                Some(acc) => acc.intersection(&dates).copied().collect(),
            });
        }
        common.map(|s| s.into_iter().collect()).unwrap_or_default()
    }

    /// Pick a random replayable date.
    ///
    /// Prefers dates usable in every timeframe; when no such date exists, falls back
    /// to the primary timeframe's usable dates. `None` when the store holds nothing
    /// usable at all.
    pub fn random_common_date<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<NaiveDate> {
        let common = self.common_dates();
        if let Some(d) = common.choose(rng) {
            return Some(*d);
        }
        let primary = self.primary_timeframe()?;
        self.dates_with_min_candles(primary, primary.min_daily_candles())
            .choose(rng)
            .copied()
    }
}
