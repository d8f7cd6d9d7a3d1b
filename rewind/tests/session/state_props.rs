use proptest::prelude::*;
use rewind::{SessionState, SyncStrategy, Tick, Timeframe};

use crate::helpers::{day_one, short_store};

fn strategy() -> impl Strategy<Value = SyncStrategy> {
    prop_oneof![Just(SyncStrategy::LocalWindow), Just(SyncStrategy::BinarySearch)]
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 48, .. ProptestConfig::default() })]

    // From any seek target, indices run contiguously to the end and every snapshot
    // covers the primary timestamp once the coarse cursors have caught up.
    #[test]
    fn replay_from_any_cursor(
        minutes in 20usize..200,
        seek_pct in 0usize..100,
        strategy in strategy(),
    ) {
        let store = short_store(minutes);
        let mut state = SessionState::new(1.0, strategy, 2);
        let ready = state.start(&store, day_one(), 1.0).unwrap();
        prop_assert_eq!(ready.total_candles, minutes);

        let seek = seek_pct * minutes / 100;
        state.seek(seek).unwrap();
        state.play().unwrap();

        let mut expected = seek;
        loop {
            match state.tick().unwrap() {
                Tick::Candle { index, progress, candles, .. } => {
                    prop_assert_eq!(index, expected);
                    prop_assert!((0.0..100.0).contains(&progress));
                    let t = candles[&Timeframe::M1].timestamp;
                    for (tf, snap) in &candles {
                        prop_assert!(snap.timestamp <= t);
                        if strategy == SyncStrategy::BinarySearch || seek == 0 {
                            prop_assert!(t < snap.timestamp + tf.seconds());
                        }
                    }
                    expected += 1;
                }
                Tick::Finished => break,
                Tick::Heartbeat(p) => prop_assert!(false, "heartbeat while {:?}", p),
            }
        }
        prop_assert_eq!(expected, minutes);
        prop_assert_eq!(state.status().current_index, minutes);
    }
}
