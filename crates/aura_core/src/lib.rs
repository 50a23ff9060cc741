//! # AuraCompass Core
//!
//! Pure domain logic for the AuraCompass affect engine:
//!
//! - **Emotion vocabularies**: the closed sets of face-derived and
//!   text-derived emotion labels, plus the render-only avatar states.
//! - **Text sentiment**: keyword-table classification and crisis phrase
//!   detection. The tables are static and public so the crisis-safety
//!   logic stays auditable.
//! - **Emotion blending**: combining a text-derived state with a
//!   face-derived label into one displayed state.
//! - **Configuration**: all fusion windows, caps and thresholds.
//!
//! Everything in this crate is a pure function over its arguments and the
//! static tables. Temporal behavior (sample history, sessions, debouncing)
//! lives in `aura_fusion`.

pub mod blend;
pub mod config;
pub mod emotion;
pub mod sentiment;

pub use blend::{blend, priority};
pub use config::{AuraConfig, DetectionConfig, FusionConfig};
pub use emotion::{AvatarState, EmotionalState, FaceEmotion};
pub use sentiment::{analyze, classify, is_text_crisis, TextAnalysis};
