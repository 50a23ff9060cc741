//! Emotion label vocabularies and the fixed mapping tables between them.
//!
//! Two distinct closed sets: [`FaceEmotion`] is what the external face
//! model emits, [`EmotionalState`] is what the rest of the application
//! (text classifier, blender, display) speaks. [`AvatarState`] is a
//! render-only superset of `EmotionalState` and never feeds back into
//! fusion logic.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown emotion label: '{0}'")]
pub struct ParseEmotionError(String);

// ============================================================================
// FaceEmotion
// ============================================================================

/// Emotion label emitted by the face-expression model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceEmotion {
    Happy,
    Sad,
    Angry,
    Surprised,
    Neutral,
    Fear,
    Disgust,
}

impl FaceEmotion {
    /// All labels in fixed declaration order.
    ///
    /// This order is load-bearing: majority voting breaks ties by picking
    /// the earliest label here, so reordering changes observable behavior.
    pub const ALL: [FaceEmotion; 7] = [
        FaceEmotion::Happy,
        FaceEmotion::Sad,
        FaceEmotion::Angry,
        FaceEmotion::Surprised,
        FaceEmotion::Neutral,
        FaceEmotion::Fear,
        FaceEmotion::Disgust,
    ];

    /// Position within [`Self::ALL`], used for counting buckets.
    pub fn index(self) -> usize {
        match self {
            FaceEmotion::Happy => 0,
            FaceEmotion::Sad => 1,
            FaceEmotion::Angry => 2,
            FaceEmotion::Surprised => 3,
            FaceEmotion::Neutral => 4,
            FaceEmotion::Fear => 5,
            FaceEmotion::Disgust => 6,
        }
    }

    /// Negative labels that count toward the crisis ratio.
    pub fn is_negative(self) -> bool {
        matches!(
            self,
            FaceEmotion::Sad | FaceEmotion::Angry | FaceEmotion::Fear | FaceEmotion::Disgust
        )
    }

    /// Map a face label to the emotional state used for display/theming.
    pub fn environment_state(self) -> EmotionalState {
        match self {
            FaceEmotion::Happy => EmotionalState::Calm,
            FaceEmotion::Sad => EmotionalState::Stressed,
            FaceEmotion::Angry => EmotionalState::Stressed,
            FaceEmotion::Surprised => EmotionalState::Resilient,
            FaceEmotion::Neutral => EmotionalState::Neutral,
            FaceEmotion::Fear => EmotionalState::Anxious,
            FaceEmotion::Disgust => EmotionalState::Anxious,
        }
    }

    /// Map a face label to the avatar render state.
    pub fn avatar_state(self) -> AvatarState {
        match self {
            FaceEmotion::Happy => AvatarState::Happy,
            FaceEmotion::Sad => AvatarState::Foggy,
            FaceEmotion::Angry => AvatarState::Stressed,
            FaceEmotion::Surprised => AvatarState::Glowing,
            FaceEmotion::Neutral => AvatarState::Neutral,
            FaceEmotion::Fear => AvatarState::Anxious,
            FaceEmotion::Disgust => AvatarState::Stressed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FaceEmotion::Happy => "happy",
            FaceEmotion::Sad => "sad",
            FaceEmotion::Angry => "angry",
            FaceEmotion::Surprised => "surprised",
            FaceEmotion::Neutral => "neutral",
            FaceEmotion::Fear => "fear",
            FaceEmotion::Disgust => "disgust",
        }
    }
}

impl fmt::Display for FaceEmotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FaceEmotion {
    type Err = ParseEmotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "happy" => Ok(FaceEmotion::Happy),
            "sad" => Ok(FaceEmotion::Sad),
            "angry" => Ok(FaceEmotion::Angry),
            "surprised" => Ok(FaceEmotion::Surprised),
            "neutral" => Ok(FaceEmotion::Neutral),
            "fear" => Ok(FaceEmotion::Fear),
            "disgust" => Ok(FaceEmotion::Disgust),
            other => Err(ParseEmotionError(other.to_string())),
        }
    }
}

// ============================================================================
// EmotionalState
// ============================================================================

/// Emotional state used for text classification, blending and display.
///
/// Deliberately a different vocabulary from [`FaceEmotion`]; the two meet
/// only through [`FaceEmotion::environment_state`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionalState {
    Neutral,
    Stressed,
    Anxious,
    Calm,
    Happy,
    Resilient,
}

impl EmotionalState {
    pub const ALL: [EmotionalState; 6] = [
        EmotionalState::Neutral,
        EmotionalState::Stressed,
        EmotionalState::Anxious,
        EmotionalState::Calm,
        EmotionalState::Happy,
        EmotionalState::Resilient,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EmotionalState::Neutral => "neutral",
            EmotionalState::Stressed => "stressed",
            EmotionalState::Anxious => "anxious",
            EmotionalState::Calm => "calm",
            EmotionalState::Happy => "happy",
            EmotionalState::Resilient => "resilient",
        }
    }
}

impl fmt::Display for EmotionalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmotionalState {
    type Err = ParseEmotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "neutral" => Ok(EmotionalState::Neutral),
            "stressed" => Ok(EmotionalState::Stressed),
            "anxious" => Ok(EmotionalState::Anxious),
            "calm" => Ok(EmotionalState::Calm),
            "happy" => Ok(EmotionalState::Happy),
            "resilient" => Ok(EmotionalState::Resilient),
            other => Err(ParseEmotionError(other.to_string())),
        }
    }
}

// ============================================================================
// AvatarState
// ============================================================================

/// Render state for the avatar. `Foggy` and `Glowing` exist only here;
/// they are derived presentation states, never independent data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvatarState {
    Neutral,
    Stressed,
    Anxious,
    Calm,
    Happy,
    Foggy,
    Glowing,
}

impl From<EmotionalState> for AvatarState {
    fn from(state: EmotionalState) -> Self {
        match state {
            EmotionalState::Neutral => AvatarState::Neutral,
            EmotionalState::Stressed => AvatarState::Stressed,
            EmotionalState::Anxious => AvatarState::Anxious,
            EmotionalState::Calm => AvatarState::Calm,
            EmotionalState::Happy => AvatarState::Happy,
            // Resilient has no dedicated avatar art; it renders as glowing
            EmotionalState::Resilient => AvatarState::Glowing,
        }
    }
}

impl AvatarState {
    pub fn as_str(self) -> &'static str {
        match self {
            AvatarState::Neutral => "neutral",
            AvatarState::Stressed => "stressed",
            AvatarState::Anxious => "anxious",
            AvatarState::Calm => "calm",
            AvatarState::Happy => "happy",
            AvatarState::Foggy => "foggy",
            AvatarState::Glowing => "glowing",
        }
    }
}

impl fmt::Display for AvatarState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AvatarState {
    type Err = ParseEmotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "neutral" => Ok(AvatarState::Neutral),
            "stressed" => Ok(AvatarState::Stressed),
            "anxious" => Ok(AvatarState::Anxious),
            "calm" => Ok(AvatarState::Calm),
            "happy" => Ok(AvatarState::Happy),
            "foggy" => Ok(AvatarState::Foggy),
            "glowing" => Ok(AvatarState::Glowing),
            other => Err(ParseEmotionError(other.to_string())),
        }
    }
}
