use std::collections::BTreeMap;

use rewind::{Candle, CandleSnapshot, ReplayEvent, SessionPhase, Timeframe, sse_frame};
use rust_decimal::Decimal;

#[test]
fn heartbeat_frame() {
    let frame = sse_frame(&ReplayEvent::Heartbeat {
        status: SessionPhase::Paused,
    })
    .unwrap();
    assert_eq!(frame, "data: {\"type\":\"heartbeat\",\"status\":\"paused\"}\n\n");
}

#[test]
fn candle_frame_is_single_json_line() {
    let candle = Candle::flat(1_704_205_800, Decimal::new(10_000, 2));
    let mut candles = BTreeMap::new();
    candles.insert(Timeframe::M1, CandleSnapshot::new(Timeframe::M1, 0, &candle));
    candles.insert(Timeframe::H1, CandleSnapshot::new(Timeframe::H1, 0, &candle));
    let frame = sse_frame(&ReplayEvent::MultiTimeframeCandle {
        primary: Timeframe::M1,
        index: 0,
        progress: 0.0,
        candles,
    })
    .unwrap();

    let body = frame
        .strip_prefix("data: ")
        .and_then(|s| s.strip_suffix("\n\n"))
        .expect("sse framing");
    assert!(!body.contains('\n'));
    let value: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(value["type"], "multi_timeframe_candle");
    assert_eq!(value["candles"]["H1"]["timestamp"], 1_704_205_800);
}

#[test]
fn error_frame_carries_message() {
    let frame = sse_frame(&ReplayEvent::Error {
        message: "boom".into(),
    })
    .unwrap();
    assert!(frame.contains("\"type\":\"error\""));
    assert!(frame.contains("\"message\":\"boom\""));
}
