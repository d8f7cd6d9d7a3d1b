// Shared fixtures so tests can `use crate::helpers::*;`
#![allow(dead_code)]

use std::time::Duration;

use chrono::NaiveDate;
use rewind::{Replay, ReplayEvent, SeriesStore};
use rewind_mock::fixtures::session::{DAY_ONE, DAY_TWO, EMPTY_DAY, date};
use tokio::sync::mpsc;

/// Upper bound for draining a stream in paused-clock tests.
pub const DRAIN_TIMEOUT: Duration = Duration::from_secs(3_600);

pub fn day_one() -> NaiveDate {
    date(DAY_ONE)
}

pub fn day_two() -> NaiveDate {
    date(DAY_TWO)
}

pub fn empty_day() -> NaiveDate {
    date(EMPTY_DAY)
}

/// Store with `minutes` one-minute bars on day one, plus every coarser timeframe.
pub fn short_store(minutes: usize) -> SeriesStore {
    rewind_mock::store(&[day_one()], minutes)
}

/// Controller over both full fixture days with default configuration.
pub fn replay() -> Replay {
    Replay::builder()
        .with_store(rewind_mock::fixture_store())
        .build()
        .expect("default config is valid")
}

/// Controller over a short single-day store, ticking every half second.
pub fn short_replay(minutes: usize) -> Replay {
    Replay::builder()
        .with_store(short_store(minutes))
        .default_speed(0.5)
        .build()
        .expect("valid config")
}

/// Receive events until a terminal one or until the channel closes.
pub async fn drain_until_terminal(rx: &mut mpsc::Receiver<ReplayEvent>) -> Vec<ReplayEvent> {
    let mut out = Vec::new();
    let collect = async {
        while let Some(ev) = rx.recv().await {
            let terminal = ev.is_terminal();
            out.push(ev);
            if terminal {
                break;
            }
        }
    };
    tokio::time::timeout(DRAIN_TIMEOUT, collect)
        .await
        .expect("stream reached a terminal event");
    out
}

/// Receive until the channel closes, failing if it stays open.
pub async fn drain_to_close(rx: &mut mpsc::Receiver<ReplayEvent>) -> Vec<ReplayEvent> {
    let mut out = Vec::new();
    let collect = async {
        while let Some(ev) = rx.recv().await {
            out.push(ev);
        }
    };
    tokio::time::timeout(DRAIN_TIMEOUT, collect)
        .await
        .expect("stream closed");
    out
}

/// Primary indices of the multi-timeframe events in `events`.
pub fn candle_indices(events: &[ReplayEvent]) -> Vec<usize> {
    events
        .iter()
        .filter_map(|ev| match ev {
            ReplayEvent::MultiTimeframeCandle { index, .. } => Some(*index),
            _ => None,
        })
        .collect()
}

pub fn is_heartbeat(ev: &ReplayEvent) -> bool {
    matches!(ev, ReplayEvent::Heartbeat { .. })
}
