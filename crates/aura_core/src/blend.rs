//! Blending a text-derived emotional state with a face-derived label.
//!
//! The blend is asymmetric by design: distress signals outrank positive
//! ones, and two specific text/face conflicts resolve to dedicated states
//! rather than through the priority table.

use crate::emotion::{EmotionalState, FaceEmotion};

/// Override priority for each emotional state. Higher wins.
///
/// Distress states outrank positive ones so that a negative face read can
/// never be masked by upbeat journal text.
pub fn priority(state: EmotionalState) -> u8 {
    match state {
        EmotionalState::Stressed => 5,
        EmotionalState::Anxious => 4,
        EmotionalState::Neutral => 2,
        EmotionalState::Calm => 1,
        EmotionalState::Happy => 1,
        EmotionalState::Resilient => 1,
    }
}

/// Combine the current text-derived state with the current face majority
/// into one displayed state.
///
/// Rules, in order:
/// 1. No face label available: the text state passes through unchanged.
/// 2. Calm words + sad/angry face: the conflict reads as `Anxious`.
/// 3. Happy words + sad face: muted optimism, reads as `Neutral`.
/// 4. Otherwise the face-derived state wins only if its priority strictly
///    exceeds the text state's.
///
/// Pure and deterministic; no hidden state.
pub fn blend(text_state: EmotionalState, face: Option<FaceEmotion>) -> EmotionalState {
    let Some(face) = face else {
        return text_state;
    };

    if text_state == EmotionalState::Calm
        && matches!(face, FaceEmotion::Sad | FaceEmotion::Angry)
    {
        return EmotionalState::Anxious;
    }
    if text_state == EmotionalState::Happy && face == FaceEmotion::Sad {
        return EmotionalState::Neutral;
    }

    let face_state = face.environment_state();
    if priority(face_state) > priority(text_state) {
        face_state
    } else {
        text_state
    }
}
