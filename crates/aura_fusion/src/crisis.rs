//! Face-based crisis detection over the sample history.
//!
//! Two independent trigger conditions, evaluated over the trailing crisis
//! window (default 5 minutes) and jointly gated on a minimum sample count:
//!
//! - negative-emotion ratio at or above the configured threshold, or
//! - a sad-sample count at or above the streak threshold.
//!
//! The detector is stateless and may re-trigger on every evaluation while
//! its preconditions hold; presenting the intervention at most once per
//! trigger event is the consumer's responsibility.

use crate::history::SampleHistory;
use aura_core::{FaceEmotion, FusionConfig};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Result of a crisis evaluation. Ephemeral; computed on demand and never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrisisSignal {
    pub triggered: bool,
    pub message: String,
    pub dominant_emotion: FaceEmotion,
}

impl CrisisSignal {
    /// The non-triggered signal.
    pub fn none() -> Self {
        Self {
            triggered: false,
            message: String::new(),
            dominant_emotion: FaceEmotion::Neutral,
        }
    }
}

/// Intervention message for the dominant emotion behind a trigger.
///
/// Every label has a message, so there is no unmapped case; callers that
/// lack a dominant label use `Neutral`.
pub fn intervention_message(dominant: FaceEmotion) -> &'static str {
    match dominant {
        FaceEmotion::Sad => {
            "I've noticed you've been looking very sad for a while. Your wellbeing matters deeply to me."
        }
        FaceEmotion::Angry => {
            "I can see you've been feeling intense anger. Let's find healthy ways to process these feelings."
        }
        FaceEmotion::Fear => {
            "I notice signs of fear or distress in your expressions. You're safe here, and help is available."
        }
        FaceEmotion::Disgust => {
            "I can see you're experiencing difficult emotions. Please know that you're not alone in this."
        }
        FaceEmotion::Happy => {
            "I'm glad to see positive emotions, but I'm still concerned about your recent distress."
        }
        FaceEmotion::Surprised => {
            "I notice mixed emotions. It's important we address any underlying concerns."
        }
        FaceEmotion::Neutral => {
            "Even though you appear calm now, I'm concerned about your recent emotional state."
        }
    }
}

/// Stateless evaluator parameterized by the fusion thresholds.
#[derive(Debug, Clone)]
pub struct CrisisDetector {
    config: FusionConfig,
}

impl Default for CrisisDetector {
    fn default() -> Self {
        Self::new(FusionConfig::default())
    }
}

impl CrisisDetector {
    pub fn new(config: FusionConfig) -> Self {
        Self { config }
    }

    /// Whether the history meets either trigger condition, with `now_ms`
    /// injected for determinism.
    ///
    /// Fewer than `crisis_min_samples` samples in the window never
    /// triggers, regardless of content. The gate applies to both the
    /// ratio branch and the sad-streak branch.
    pub fn is_crisis_at(&self, history: &SampleHistory, window_ms: i64, now_ms: i64) -> bool {
        let mut total = 0usize;
        let mut negative = 0usize;
        let mut sad = 0usize;

        for s in history.window_at(window_ms, now_ms) {
            total += 1;
            if s.emotion.is_negative() {
                negative += 1;
            }
            if s.emotion == FaceEmotion::Sad {
                sad += 1;
            }
        }

        if total < self.config.crisis_min_samples {
            return false;
        }

        let ratio = negative as f64 / total as f64;
        ratio >= self.config.crisis_negative_ratio || sad >= self.config.crisis_sad_streak
    }

    /// `is_crisis_at` over the configured window, ending now.
    pub fn is_crisis(&self, history: &SampleHistory) -> bool {
        self.is_crisis_at(
            history,
            self.config.crisis_window_ms,
            Utc::now().timestamp_millis(),
        )
    }

    /// Full evaluation: trigger state plus the intervention message keyed
    /// on the dominant (majority) emotion over the same window. A missing
    /// dominant label falls back to `Neutral` and its message.
    pub fn evaluate_at(&self, history: &SampleHistory, window_ms: i64, now_ms: i64) -> CrisisSignal {
        if !self.is_crisis_at(history, window_ms, now_ms) {
            return CrisisSignal::none();
        }

        let dominant = history
            .majority_at(window_ms, now_ms)
            .unwrap_or(FaceEmotion::Neutral);
        tracing::warn!(dominant = %dominant, "face-based crisis pattern detected");

        CrisisSignal {
            triggered: true,
            message: intervention_message(dominant).to_string(),
            dominant_emotion: dominant,
        }
    }

    pub fn evaluate(&self, history: &SampleHistory) -> CrisisSignal {
        self.evaluate_at(
            history,
            self.config.crisis_window_ms,
            Utc::now().timestamp_millis(),
        )
    }
}
