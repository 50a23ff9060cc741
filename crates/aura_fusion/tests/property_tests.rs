//! Property-based tests for aura_fusion.
//!
//! Verifies the sample-history retention invariants and the determinism
//! of the majority vote and crisis detector over arbitrary ingest
//! sequences.

use aura_core::{FaceEmotion, FusionConfig};
use aura_fusion::{CrisisDetector, EmotionSample, SampleHistory};
use proptest::prelude::*;

fn arb_face_emotion() -> impl Strategy<Value = FaceEmotion> {
    prop::sample::select(FaceEmotion::ALL.to_vec())
}

/// (emotion, inter-arrival gap in ms) — gaps from instant bursts up to
/// beyond the retention window.
fn arb_sample_stream() -> impl Strategy<Value = Vec<(FaceEmotion, i64)>> {
    prop::collection::vec((arb_face_emotion(), 0i64..700_000), 0..60)
}

proptest! {
    /// After every ingest: never more than 20 samples, none older than
    /// the retention window, timestamps ascending.
    #[test]
    fn history_invariants_hold_under_arbitrary_ingest(stream in arb_sample_stream()) {
        let config = FusionConfig::default();
        let mut history = SampleHistory::from_config(&config);
        let mut now = 0i64;

        for (emotion, gap) in stream {
            now += gap;
            history.ingest_at(EmotionSample::new(emotion, 0.5, now), now);

            prop_assert!(history.len() <= config.history_cap);
            let mut prev_ts = i64::MIN;
            for s in history.iter() {
                prop_assert!(now - s.timestamp_ms < config.retention_ms);
                prop_assert!(s.timestamp_ms >= prev_ts);
                prev_ts = s.timestamp_ms;
            }
        }
    }

    /// The majority label, when present, is one that actually occurs in
    /// the window, and repeated evaluation is stable.
    #[test]
    fn majority_is_a_window_member_and_stable(stream in arb_sample_stream()) {
        let config = FusionConfig::default();
        let mut history = SampleHistory::from_config(&config);
        let mut now = 0i64;
        for (emotion, gap) in stream {
            now += gap;
            history.ingest_at(EmotionSample::new(emotion, 0.5, now), now);
        }

        let majority = history.majority_at(config.majority_window_ms, now);
        prop_assert_eq!(majority, history.majority_at(config.majority_window_ms, now));

        match majority {
            None => {
                prop_assert_eq!(history.window_at(config.majority_window_ms, now).count(), 0);
            }
            Some(label) => {
                prop_assert!(history
                    .window_at(config.majority_window_ms, now)
                    .any(|s| s.emotion == label));
            }
        }
    }

    /// The crisis detector never triggers with fewer than the minimum
    /// sample count in the window, whatever the labels.
    #[test]
    fn crisis_respects_minimum_sample_gate(
        emotions in prop::collection::vec(arb_face_emotion(), 0..5),
    ) {
        let config = FusionConfig::default();
        let mut history = SampleHistory::from_config(&config);
        let mut now = 0i64;
        for emotion in emotions {
            now += 1_000;
            history.ingest_at(EmotionSample::new(emotion, 0.9, now), now);
        }

        let detector = CrisisDetector::new(config.clone());
        prop_assert!(!detector.is_crisis_at(&history, config.crisis_window_ms, now));
    }

    /// A window of uniformly negative samples at or past the gate always
    /// triggers (ratio 1.0 >= 0.8).
    #[test]
    fn all_negative_window_triggers(
        negative in prop::sample::select(vec![
            FaceEmotion::Sad,
            FaceEmotion::Angry,
            FaceEmotion::Fear,
            FaceEmotion::Disgust,
        ]),
        count in 5usize..20,
    ) {
        let config = FusionConfig::default();
        let mut history = SampleHistory::from_config(&config);
        let mut now = 0i64;
        for _ in 0..count {
            now += 1_000;
            history.ingest_at(EmotionSample::new(negative, 0.9, now), now);
        }

        let detector = CrisisDetector::new(config.clone());
        prop_assert!(detector.is_crisis_at(&history, config.crisis_window_ms, now));
    }
}
