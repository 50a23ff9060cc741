//! # AuraCompass Store
//!
//! Local persistence with a forgiving contract: every read returns a
//! defined default when the key is absent, the backend is unavailable, or
//! the stored JSON fails to parse. Storage problems are never fatal to
//! the wellness flow — they degrade to an empty session.
//!
//! The [`KeyValueBackend`] trait is the seam to whatever string-keyed
//! store the host provides; [`SessionStore`] layers the typed records
//! (current emotional state, journal entries, user progress, wellness
//! metrics) on top.

mod backend;
mod session_store;

pub use backend::{JsonFileBackend, KeyValueBackend, MemoryBackend};
pub use session_store::{
    JournalEntry, SessionStore, Streaks, UserProgress, WellnessMetrics,
};
