use std::time::Duration;

use rewind::{ReplayEvent, SessionPhase, Timeframe};
use tokio::time::Instant;

use crate::helpers::{
    candle_indices, day_one, drain_until_terminal, is_heartbeat, short_replay,
};

#[tokio::test(start_paused = true)]
async fn plays_every_index_then_finishes_once() {
    let replay = short_replay(30);
    replay.start(day_one(), None).await.unwrap();
    let (handle, mut rx) = replay.stream().await.unwrap();
    replay.play().await.unwrap();

    let events = drain_until_terminal(&mut rx).await;
    assert_eq!(candle_indices(&events), (0..30).collect::<Vec<_>>());
    assert!(matches!(events.last(), Some(ReplayEvent::Finished { .. })));
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, ReplayEvent::Finished { .. }))
            .count(),
        1
    );
    assert!(rx.recv().await.is_none(), "stream closes after finished");

    let status = replay.status().await;
    assert_eq!(status.phase, SessionPhase::Paused);
    assert_eq!(status.current_index, 30);
    handle.stop().await;
}

#[tokio::test(start_paused = true)]
async fn every_multi_event_is_followed_by_its_echo() {
    let replay = short_replay(8);
    replay.start(day_one(), None).await.unwrap();
    let (_handle, mut rx) = replay.stream().await.unwrap();
    replay.play().await.unwrap();

    let events: Vec<_> = drain_until_terminal(&mut rx)
        .await
        .into_iter()
        .filter(|e| !is_heartbeat(e))
        .collect();
    for pair in events[..events.len() - 1].chunks(2) {
        match pair {
            [
                ReplayEvent::MultiTimeframeCandle {
                    index,
                    primary,
                    candles,
                    progress,
                },
                ReplayEvent::Candle {
                    index: echo,
                    timestamp,
                    progress: echo_progress,
                    ..
                },
            ] => {
                assert_eq!(index, echo);
                assert_eq!(*primary, Timeframe::M1);
                assert_eq!(candles[&Timeframe::M1].timestamp, *timestamp);
                assert!((progress - echo_progress).abs() < f64::EPSILON);
            }
            other => panic!("unexpected pair {other:?}"),
        }
    }
}

#[tokio::test(start_paused = true)]
async fn heartbeats_until_play() {
    let replay = short_replay(10);
    replay.start(day_one(), None).await.unwrap();
    let (_handle, mut rx) = replay.stream().await.unwrap();

    for _ in 0..3 {
        assert_eq!(
            rx.recv().await,
            Some(ReplayEvent::Heartbeat {
                status: SessionPhase::Ready
            })
        );
    }
    // heartbeats are spaced by the configured interval
    let before = Instant::now();
    rx.recv().await.unwrap();
    assert!(before.elapsed() >= Duration::from_secs(1));

    replay.play().await.unwrap();
    let next = tokio::time::timeout(Duration::from_millis(10), async {
        loop {
            match rx.recv().await {
                Some(ReplayEvent::MultiTimeframeCandle { index, .. }) => return index,
                Some(_) => {}
                None => panic!("stream closed"),
            }
        }
    })
    .await
    .expect("play wakes the heartbeat wait");
    assert_eq!(next, 0);
}

#[tokio::test(start_paused = true)]
async fn pause_halts_candle_flow() {
    let replay = short_replay(60);
    replay.start(day_one(), None).await.unwrap();
    let (_handle, mut rx) = replay.stream().await.unwrap();
    replay.play().await.unwrap();

    let mut seen = 0;
    while seen < 3 {
        if let Some(ReplayEvent::MultiTimeframeCandle { .. }) = rx.recv().await {
            seen += 1;
        }
    }
    let paused_at = replay.pause().await.unwrap().current_index;

    loop {
        match rx.recv().await.unwrap() {
            ReplayEvent::Heartbeat {
                status: SessionPhase::Paused,
            } => break,
            ReplayEvent::MultiTimeframeCandle { index, .. } => assert!(index < paused_at),
            _ => {}
        }
    }
    for _ in 0..3 {
        assert_eq!(
            rx.recv().await,
            Some(ReplayEvent::Heartbeat {
                status: SessionPhase::Paused
            })
        );
    }
    assert_eq!(replay.status().await.current_index, paused_at);
}

#[tokio::test(start_paused = true)]
async fn seek_before_play_sets_first_index() {
    let replay = short_replay(30);
    replay.start(day_one(), None).await.unwrap();
    let (_handle, mut rx) = replay.stream().await.unwrap();
    replay.seek(20).await.unwrap();
    replay.play().await.unwrap();

    let events = drain_until_terminal(&mut rx).await;
    assert_eq!(candle_indices(&events), (20..30).collect::<Vec<_>>());
}

#[tokio::test(start_paused = true)]
async fn speed_sets_the_wait_between_ticks() {
    let replay = short_replay(10);
    replay.start(day_one(), Some(2.0)).await.unwrap();
    let (_handle, mut rx) = replay.stream().await.unwrap();
    replay.play().await.unwrap();

    let mut stamps = Vec::new();
    while stamps.len() < 3 {
        if let Some(ReplayEvent::MultiTimeframeCandle { .. }) = rx.recv().await {
            stamps.push(Instant::now());
        }
    }
    for w in stamps.windows(2) {
        let gap = w[1] - w[0];
        assert!(gap >= Duration::from_secs(2) && gap < Duration::from_secs(3), "gap {gap:?}");
    }

    replay.set_speed(5.0).await.unwrap();
    // the running wait keeps its deadline; the one after uses the new speed
    let mut later = Vec::new();
    while later.len() < 3 {
        if let Some(ReplayEvent::MultiTimeframeCandle { .. }) = rx.recv().await {
            later.push(Instant::now());
        }
    }
    let gap = later[2] - later[1];
    assert!(gap >= Duration::from_secs(5), "gap {gap:?}");
}

#[tokio::test(start_paused = true)]
async fn pause_is_not_masked_by_a_following_speed_change() {
    let replay = short_replay(30);
    replay.start(day_one(), Some(10.0)).await.unwrap();
    let (_handle, mut rx) = replay.stream().await.unwrap();
    replay.play().await.unwrap();
    loop {
        if let Some(ReplayEvent::MultiTimeframeCandle { .. }) = rx.recv().await {
            break;
        }
    }

    replay.pause().await.unwrap();
    replay.set_speed(10.0).await.unwrap();
    replay.play().await.unwrap();
    replay.pause().await.unwrap();
    replay.set_speed(5.0).await.unwrap();

    let started = Instant::now();
    tokio::time::timeout(Duration::from_secs(1), async {
        loop {
            match rx.recv().await {
                Some(ReplayEvent::Heartbeat {
                    status: SessionPhase::Paused,
                }) => break,
                Some(_) => {}
                None => panic!("stream closed"),
            }
        }
    })
    .await
    .expect("paused heartbeat arrives without waiting out the tick");
    assert!(started.elapsed() < Duration::from_secs(1));
}
