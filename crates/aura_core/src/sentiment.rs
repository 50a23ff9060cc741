//! Keyword-based text sentiment classification and crisis phrase detection.
//!
//! The "AI" here is a set of static substring tables, kept public and
//! explicit so the crisis-safety behavior can be audited and tested
//! directly. In production these would be candidates for a learned model,
//! but the table form is a feature: the crisis path must be predictable.

use crate::emotion::EmotionalState;

// ============================================================================
// Keyword tables
// ============================================================================

/// Crisis phrases. Checked before everything else; a match must always be
/// surfaced through [`is_text_crisis`] / [`TextAnalysis::crisis`], never
/// silently folded into a normal label.
pub const CRISIS_PHRASES: &[&str] = &[
    "suicide",
    "die",
    "give up",
    "end it all",
    "kill myself",
    "want to die",
    "no point",
    "worthless",
];

pub const STRESS_KEYWORDS: &[&str] = &[
    "stressed",
    "overwhelmed",
    "tired",
    "exhausted",
    "pressure",
    "burden",
    "can't cope",
];

pub const ANXIETY_KEYWORDS: &[&str] = &[
    "anxious", "nervous", "worried", "panic", "fear", "scared", "uncertain",
];

pub const CALM_KEYWORDS: &[&str] = &[
    "calm", "peaceful", "relaxed", "content", "serene", "balanced", "centered",
];

pub const HAPPY_KEYWORDS: &[&str] = &[
    "happy",
    "joy",
    "excited",
    "great",
    "amazing",
    "wonderful",
    "fantastic",
    "love",
];

pub const RESILIENT_KEYWORDS: &[&str] = &[
    "strong",
    "confident",
    "determined",
    "motivated",
    "empowered",
    "capable",
];

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

// ============================================================================
// Classification
// ============================================================================

/// Classify free text into an emotional state.
///
/// Groups are checked in strict priority order: crisis, stress, anxiety,
/// calm, happy, resilience. The first matching group wins; overlapping
/// keywords across groups are disambiguated by this order alone. No match
/// (including empty text) returns `Neutral`.
///
/// Crisis text classifies as `Stressed` — the crisis path itself is
/// signalled separately, so callers must always run [`is_text_crisis`]
/// (or use [`analyze`]) alongside this function.
pub fn classify(text: &str) -> EmotionalState {
    let lower = text.to_lowercase();

    if contains_any(&lower, CRISIS_PHRASES) {
        return EmotionalState::Stressed;
    }
    if contains_any(&lower, STRESS_KEYWORDS) {
        return EmotionalState::Stressed;
    }
    if contains_any(&lower, ANXIETY_KEYWORDS) {
        return EmotionalState::Anxious;
    }
    if contains_any(&lower, CALM_KEYWORDS) {
        return EmotionalState::Calm;
    }
    if contains_any(&lower, HAPPY_KEYWORDS) {
        return EmotionalState::Happy;
    }
    if contains_any(&lower, RESILIENT_KEYWORDS) {
        return EmotionalState::Resilient;
    }

    EmotionalState::Neutral
}

/// Case-insensitive check for crisis phrases. Any match bypasses normal
/// sentiment handling for that input.
pub fn is_text_crisis(text: &str) -> bool {
    let lower = text.to_lowercase();
    contains_any(&lower, CRISIS_PHRASES)
}

// ============================================================================
// Combined analysis
// ============================================================================

/// Result of running classification and the crisis check together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextAnalysis {
    pub state: EmotionalState,
    pub crisis: bool,
    pub advice: &'static str,
}

/// Classify text and run the crisis check in one call.
pub fn analyze(text: &str) -> TextAnalysis {
    let crisis = is_text_crisis(text);
    let state = classify(text);
    if crisis {
        tracing::warn!("crisis phrase detected in text input");
    }
    TextAnalysis {
        state,
        crisis,
        advice: advice_for(state),
    }
}

/// Static per-state wellness advice shown alongside journal entries.
pub fn advice_for(state: EmotionalState) -> &'static str {
    match state {
        EmotionalState::Stressed => {
            "Take a deep breath. Try a 5-minute break and remember: this feeling is temporary."
        }
        EmotionalState::Anxious => {
            "Ground yourself with the 5-4-3-2-1 technique: 5 things you see, 4 you hear, 3 you touch, 2 you smell, 1 you taste."
        }
        EmotionalState::Calm => {
            "Beautiful! You're in a peaceful state. Consider journaling about what's working well for you."
        }
        EmotionalState::Happy => {
            "Wonderful energy! Share this positivity - maybe reach out to someone you care about."
        }
        EmotionalState::Resilient => {
            "You're showing incredible strength. Remember this feeling for challenging times ahead."
        }
        EmotionalState::Neutral => {
            "Take a moment to check in with yourself. How are you really feeling right now?"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_neutral() {
        assert_eq!(classify(""), EmotionalState::Neutral);
        assert_eq!(classify("   "), EmotionalState::Neutral);
        assert!(!is_text_crisis(""));
    }

    #[test]
    fn test_no_keywords_is_neutral() {
        assert_eq!(classify("the meeting is at noon"), EmotionalState::Neutral);
    }

    #[test]
    fn test_stress_keywords() {
        assert_eq!(classify("I am so overwhelmed by work"), EmotionalState::Stressed);
        assert_eq!(classify("feeling exhausted today"), EmotionalState::Stressed);
    }

    #[test]
    fn test_anxiety_keywords() {
        assert_eq!(classify("I'm nervous about tomorrow"), EmotionalState::Anxious);
        assert_eq!(classify("full of fear"), EmotionalState::Anxious);
    }

    #[test]
    fn test_calm_happy_resilient() {
        assert_eq!(classify("feeling peaceful this morning"), EmotionalState::Calm);
        assert_eq!(classify("what a wonderful day"), EmotionalState::Happy);
        assert_eq!(classify("I feel capable and ready"), EmotionalState::Resilient);
    }

    #[test]
    fn test_group_priority_order() {
        // "tired" (stress) beats "happy" (happy) because stress is checked first
        assert_eq!(classify("happy but tired"), EmotionalState::Stressed);
        // "worried" (anxiety) beats "calm"
        assert_eq!(classify("calm but worried"), EmotionalState::Anxious);
        // "calm" beats "love"
        assert_eq!(classify("I love feeling calm"), EmotionalState::Calm);
    }

    #[test]
    fn test_crisis_detection_case_insensitive() {
        assert!(is_text_crisis("I want to DIE"));
        assert!(is_text_crisis("There's No Point anymore"));
        assert!(is_text_crisis("i feel worthless"));
        assert!(!is_text_crisis("today was fine"));
    }

    #[test]
    fn test_crisis_substring_semantics() {
        // Substring matching is intentionally aggressive for safety:
        // "diet" contains "die" and must trigger.
        assert!(is_text_crisis("starting a new diet"));
    }

    #[test]
    fn test_crisis_classifies_as_stressed() {
        let analysis = analyze("I just want to end it all");
        assert!(analysis.crisis);
        assert_eq!(analysis.state, EmotionalState::Stressed);
    }

    #[test]
    fn test_analyze_attaches_advice() {
        let analysis = analyze("feeling anxious");
        assert!(!analysis.crisis);
        assert_eq!(analysis.state, EmotionalState::Anxious);
        assert_eq!(analysis.advice, advice_for(EmotionalState::Anxious));
    }

    #[test]
    fn test_every_state_has_advice() {
        for state in EmotionalState::ALL {
            assert!(!advice_for(state).is_empty());
        }
    }
}
