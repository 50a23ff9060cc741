//! # AuraCompass Fusion
//!
//! The temporal half of the affect engine. Where `aura_core` is pure
//! functions over static tables, this crate owns everything with a clock
//! in it:
//!
//! 1. A bounded, time-windowed history of face-emotion samples with a
//!    deterministic majority vote.
//! 2. A stateless crisis detector evaluated over that history.
//! 3. A `DetectionSession` that drives the external face-sample source on
//!    a fixed interval, fuses face and text state, and broadcasts
//!    snapshots to subscribers.
//! 4. A trailing-edge debouncer for keystroke-driven text analysis.
//!
//! The session is an explicit object owned by the caller — start/stop
//! lifecycle, no module-level singleton. Within one sampling tick,
//! ingestion always completes before the majority vote or crisis detector
//! reads the history.

mod crisis;
mod debounce;
mod history;
mod session;

pub use crisis::{intervention_message, CrisisDetector, CrisisSignal};
pub use debounce::TextDebouncer;
pub use history::{EmotionSample, SampleHistory};
pub use session::{DetectionSession, FaceSampleSource, FusionSnapshot, SessionError};
