use rewind::{ReplayError, SessionPhase, Timeframe};

use crate::helpers::{day_one, day_two, empty_day, replay};

#[tokio::test]
async fn start_without_data_for_date_stays_idle() {
    let replay = replay();
    let err = replay.start(empty_day(), None).await.unwrap_err();
    assert_eq!(
        err,
        ReplayError::NoData {
            date: "2024-01-06".into(),
            timeframe: Timeframe::M1,
        }
    );
    let status = replay.status().await;
    assert_eq!(status.phase, SessionPhase::Idle);
    assert!(status.loaded_timeframes.is_empty());
    assert_eq!(status.total_candles, 0);
    assert!(status.current_date.is_none());
}

#[tokio::test]
async fn commands_require_a_loaded_session() {
    let replay = replay();
    assert_eq!(replay.play().await.unwrap_err(), ReplayError::NotLoaded);
    assert_eq!(replay.pause().await.unwrap_err(), ReplayError::NotLoaded);
    assert_eq!(replay.seek(0).await.unwrap_err(), ReplayError::NotLoaded);
    assert!(matches!(replay.stream().await, Err(ReplayError::NotLoaded)));
}

#[tokio::test]
async fn start_reports_every_loaded_timeframe() {
    let replay = replay();
    let ready = replay.start(day_one(), None).await.unwrap();
    assert_eq!(ready.date, day_one());
    assert_eq!(ready.primary, Timeframe::M1);
    assert_eq!(ready.total_candles, 390);
    assert!((ready.speed - 1.0).abs() < f64::EPSILON);
    assert_eq!(ready.loaded_timeframes, Timeframe::ALL.to_vec());

    let status = replay.status().await;
    assert_eq!(status.phase, SessionPhase::Ready);
    assert!(!status.is_playing);
    assert_eq!(status.current_index, 0);
    assert_eq!(status.cursors.len(), Timeframe::ALL.len());
    assert!(status.cursors.values().all(|c| *c == 0));
}

#[tokio::test]
async fn restart_replaces_the_previous_session() {
    let replay = replay();
    replay.start(day_one(), None).await.unwrap();
    replay.seek(100).await.unwrap();
    replay.play().await.unwrap();

    replay.start(day_two(), Some(2.0)).await.unwrap();
    let status = replay.status().await;
    assert_eq!(status.phase, SessionPhase::Ready);
    assert_eq!(status.current_date, Some(day_two()));
    assert_eq!(status.current_index, 0);
    assert!((status.speed - 2.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn failed_restart_discards_the_previous_session() {
    let replay = replay();
    replay.start(day_one(), None).await.unwrap();
    assert!(replay.start(empty_day(), None).await.is_err());
    assert_eq!(replay.status().await.phase, SessionPhase::Idle);
}

#[tokio::test]
async fn start_with_disallowed_speed_changes_nothing() {
    let replay = replay();
    let err = replay.start(day_one(), Some(7.0)).await.unwrap_err();
    assert_eq!(err, ReplayError::InvalidSpeed { speed: 7.0 });
    assert_eq!(replay.status().await.phase, SessionPhase::Idle);
}

#[tokio::test]
async fn seek_is_bounded_by_total() {
    let replay = replay();
    replay.start(day_one(), None).await.unwrap();
    assert_eq!(
        replay.seek(390).await.unwrap_err(),
        ReplayError::IndexOutOfRange {
            index: 390,
            total: 390,
        }
    );
    replay.seek(389).await.unwrap();
    let status = replay.status().await;
    assert_eq!(status.current_index, 389);
    assert!((status.progress - 389.0 / 390.0 * 100.0).abs() < 1e-9);
}

#[tokio::test]
async fn set_speed_rejects_values_outside_the_allowed_set() {
    let replay = replay();
    assert_eq!(
        replay.set_speed(7.0).await.unwrap_err(),
        ReplayError::InvalidSpeed { speed: 7.0 }
    );
    assert!((replay.status().await.speed - 1.0).abs() < f64::EPSILON);

    replay.set_speed(0.5).await.unwrap();
    assert!((replay.status().await.speed - 0.5).abs() < f64::EPSILON);

    // the idle speed becomes the default for the next start
    let ready = replay.start(day_one(), None).await.unwrap();
    assert!((ready.speed - 0.5).abs() < f64::EPSILON);
}

#[tokio::test]
async fn pause_reports_cursor_and_keeps_it() {
    let replay = replay();
    replay.start(day_one(), None).await.unwrap();
    replay.seek(42).await.unwrap();
    replay.play().await.unwrap();
    assert!(replay.status().await.is_playing);

    let status = replay.pause().await.unwrap();
    assert_eq!(status.phase, SessionPhase::Paused);
    assert!(!status.is_playing);
    assert_eq!(status.current_index, 42);

    replay.play().await.unwrap();
    assert_eq!(replay.status().await.current_index, 42);
}

#[tokio::test]
async fn stop_is_idempotent() {
    let replay = replay();
    replay.stop().await;
    replay.start(day_one(), None).await.unwrap();
    replay.stop().await;
    replay.stop().await;
    let status = replay.status().await;
    assert_eq!(status.phase, SessionPhase::Idle);
    assert!(status.cursors.is_empty());
    assert_eq!(replay.play().await.unwrap_err(), ReplayError::NotLoaded);
}

#[tokio::test]
async fn start_random_picks_a_fixture_day() {
    let replay = replay();
    let ready = replay.start_random(None).await.unwrap();
    assert!(ready.date == day_one() || ready.date == day_two());
    assert_eq!(ready.total_candles, 390);
}

#[tokio::test]
async fn start_on_empty_store_is_not_ready() {
    let replay = rewind::Replay::builder()
        .with_store(rewind::SeriesStore::new())
        .build()
        .unwrap();
    assert_eq!(
        replay.start(day_one(), None).await.unwrap_err(),
        ReplayError::DataNotReady
    );
    assert_eq!(
        replay.start_random(None).await.unwrap_err(),
        ReplayError::DataNotReady
    );
}
