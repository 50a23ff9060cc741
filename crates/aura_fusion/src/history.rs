//! Bounded, time-windowed history of face-emotion samples.
//!
//! Retention discipline on every ingest: age-prune first (drop samples at
//! or beyond the retention window), then cap to the most recent N — the
//! size cap is the final authority on how many samples survive. Samples
//! are appended in arrival order, so the history is always sorted by
//! timestamp ascending.

use aura_core::{FaceEmotion, FusionConfig};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One detection tick from the face model. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmotionSample {
    pub emotion: FaceEmotion,
    /// Model confidence in `[0, 1]`; clamped at construction.
    pub confidence: f64,
    /// Epoch milliseconds.
    pub timestamp_ms: i64,
}

impl EmotionSample {
    pub fn new(emotion: FaceEmotion, confidence: f64, timestamp_ms: i64) -> Self {
        Self {
            emotion,
            confidence: confidence.clamp(0.0, 1.0),
            timestamp_ms,
        }
    }

    /// Sample stamped with the current wall clock.
    pub fn now(emotion: FaceEmotion, confidence: f64) -> Self {
        Self::new(emotion, confidence, Utc::now().timestamp_millis())
    }
}

/// Insertion-ordered sample buffer with age-based and size-based pruning.
#[derive(Debug, Clone)]
pub struct SampleHistory {
    samples: VecDeque<EmotionSample>,
    retention_ms: i64,
    cap: usize,
    majority_window_ms: i64,
}

impl Default for SampleHistory {
    fn default() -> Self {
        Self::from_config(&FusionConfig::default())
    }
}

impl SampleHistory {
    pub fn from_config(config: &FusionConfig) -> Self {
        Self {
            samples: VecDeque::with_capacity(config.history_cap),
            retention_ms: config.retention_ms,
            cap: config.history_cap,
            majority_window_ms: config.majority_window_ms,
        }
    }

    /// Append a sample and prune, with `now_ms` injected for determinism.
    pub fn ingest_at(&mut self, sample: EmotionSample, now_ms: i64) {
        self.samples.push_back(sample);

        // Age-prune, then size-cap. Order matters: the cap is the final
        // authority on maximum retained samples.
        self.samples
            .retain(|s| now_ms - s.timestamp_ms < self.retention_ms);
        while self.samples.len() > self.cap {
            self.samples.pop_front();
        }

        tracing::trace!(
            emotion = %sample.emotion,
            confidence = sample.confidence,
            retained = self.samples.len(),
            "ingested face sample"
        );
    }

    /// Append a sample using the current wall clock.
    pub fn ingest(&mut self, sample: EmotionSample) {
        self.ingest_at(sample, Utc::now().timestamp_millis());
    }

    /// Majority label over samples newer than `window_ms`, with `now_ms`
    /// injected. Returns `None` when the window is empty.
    ///
    /// Counting runs over the full closed label set and ties break by
    /// [`FaceEmotion::ALL`] declaration order (earlier label wins). The
    /// iteration is explicitly ordered — never a map whose iteration
    /// order is unspecified.
    pub fn majority_at(&self, window_ms: i64, now_ms: i64) -> Option<FaceEmotion> {
        let mut counts = [0usize; FaceEmotion::ALL.len()];
        let mut total = 0usize;

        for s in self.window_at(window_ms, now_ms) {
            counts[s.emotion.index()] += 1;
            total += 1;
        }
        if total == 0 {
            return None;
        }

        let mut best = FaceEmotion::ALL[0];
        let mut best_count = counts[0];
        for emotion in FaceEmotion::ALL {
            if counts[emotion.index()] > best_count {
                best = emotion;
                best_count = counts[emotion.index()];
            }
        }
        Some(best)
    }

    /// Majority label over the configured window, ending now.
    pub fn majority(&self) -> Option<FaceEmotion> {
        self.majority_at(self.majority_window_ms, Utc::now().timestamp_millis())
    }

    /// Samples newer than `window_ms` relative to `now_ms`.
    pub fn window_at(
        &self,
        window_ms: i64,
        now_ms: i64,
    ) -> impl Iterator<Item = &EmotionSample> {
        self.samples
            .iter()
            .filter(move |s| now_ms - s.timestamp_ms < window_ms)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EmotionSample> {
        self.samples.iter()
    }

    /// Most recently ingested sample, if any.
    pub fn latest(&self) -> Option<&EmotionSample> {
        self.samples.back()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Reset to empty (detection session stop).
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}
