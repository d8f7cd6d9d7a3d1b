use chrono::NaiveDate;
use rewind::{GapKind, GapStatus, Replay, ReplayError, SeriesStore, Timeframe};
use rewind_mock::fixtures::patterns::bullish_then_bearish;

use crate::helpers::{day_one, empty_day, replay};

#[test]
fn fixture_day_is_continuous_and_well_formed() {
    let replay = replay();
    for tf in [Timeframe::M1, Timeframe::M5, Timeframe::M15] {
        let report = replay.analyze(tf, day_one()).unwrap();
        assert_eq!(report.timeframe, tf);
        assert_eq!(report.date, day_one());
        assert_eq!(report.candle_count, 390 / tf.minutes() as usize);
        assert!(report.continuity.is_continuous, "{tf}");
        assert_eq!(report.continuity.total_gaps, 0);
        assert!(report.integrity.valid, "{tf}: {:?}", report.integrity.issues);
        for gap in &report.fair_value_gaps {
            assert!(gap.top_price > gap.bottom_price);
            assert!(gap.detection_index >= 2 && gap.detection_index < report.candle_count);
        }
    }
}

#[test]
fn missing_date_is_no_data() {
    let err = replay().analyze(Timeframe::M5, empty_day()).unwrap_err();
    assert_eq!(
        err,
        ReplayError::NoData {
            date: "2024-01-06".into(),
            timeframe: Timeframe::M5,
        }
    );
}

#[test]
fn analysis_reports_detected_gaps() {
    let mut store = SeriesStore::new();
    store.insert(Timeframe::M1, bullish_then_bearish());
    let replay = Replay::builder().with_store(store).build().unwrap();

    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
    let report = replay.analyze(Timeframe::M1, epoch).unwrap();
    let summary: Vec<_> = report
        .fair_value_gaps
        .iter()
        .map(|g| (g.kind, g.detection_index, g.status))
        .collect();
    assert_eq!(
        summary,
        vec![
            (GapKind::Bullish, 2, GapStatus::Cleared),
            (GapKind::Bearish, 7, GapStatus::Valid),
        ]
    );
    assert!(report.continuity.is_continuous);
}

#[tokio::test]
async fn analysis_does_not_touch_playback() {
    let replay = replay();
    replay.start(day_one(), None).await.unwrap();
    replay.seek(10).await.unwrap();
    let before = replay.status().await;
    replay.analyze(Timeframe::H1, day_one()).unwrap();
    assert_eq!(replay.status().await, before);
}
