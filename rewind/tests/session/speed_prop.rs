use proptest::prelude::*;
use rewind::ReplayError;

use crate::helpers::{day_one, replay};

const ALLOWED: [f64; 6] = [0.5, 1.0, 2.0, 3.0, 5.0, 10.0];

proptest! {
    #![proptest_config(ProptestConfig { cases: 32, .. ProptestConfig::default() })]
    #[test]
    fn set_speed_accepts_exactly_the_allowed_set(speed in prop_oneof![
        prop::sample::select(ALLOWED.to_vec()),
        -20.0f64..20.0,
    ]) {
        tokio_test::block_on(async move {
            let replay = replay();
            replay.start(day_one(), None).await.unwrap();
            let allowed = ALLOWED.iter().any(|s| (s - speed).abs() < 1e-9);
            match replay.set_speed(speed).await {
                Ok(()) => {
                    assert!(allowed, "accepted {speed}");
                    assert!((replay.status().await.speed - speed).abs() < 1e-9);
                }
                Err(e) => {
                    assert!(!allowed, "rejected {speed}");
                    assert_eq!(e, ReplayError::InvalidSpeed { speed });
                    assert!((replay.status().await.speed - 1.0).abs() < 1e-9);
                }
            }
        });
    }
}
