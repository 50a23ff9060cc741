//! Typed records over the key-value backend: current emotional state,
//! journal entries, user progress, and wellness metrics.
//!
//! Record shapes and storage keys match the original AuraCompass session
//! data (camelCase JSON), so an existing store migrates as-is.

use crate::backend::KeyValueBackend;
use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const KEY_CURRENT_EMOTION: &str = "auracompass_current_emotion";
const KEY_JOURNAL_ENTRIES: &str = "auracompass_journal_entries";
const KEY_USER_PROGRESS: &str = "auracompass_user_progress";
const KEY_WELLNESS_METRICS: &str = "auracompass_wellness_metrics";

// ============================================================================
// Records
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: String,
    pub content: String,
    pub emotion: String,
    pub timestamp: DateTime<Utc>,
    pub ai_advice: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub level: u32,
    pub xp: u32,
    pub streaks: Streaks,
    pub achievements: Vec<String>,
    pub total_entries: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Streaks {
    pub journaling: u32,
    pub last_journal_date: String,
}

impl Default for UserProgress {
    fn default() -> Self {
        Self {
            level: 1,
            xp: 0,
            streaks: Streaks {
                journaling: 0,
                last_journal_date: String::new(),
            },
            achievements: Vec::new(),
            total_entries: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WellnessMetrics {
    /// Hours of sleep per night.
    pub sleep: f64,
    /// Hours of screen time per day.
    pub screen_time: f64,
    pub work_hours: f64,
    /// Hours of physical activity per week.
    pub physical_activity: f64,
    pub last_updated: DateTime<Utc>,
}

impl Default for WellnessMetrics {
    fn default() -> Self {
        Self {
            sleep: 7.0,
            screen_time: 6.0,
            work_hours: 8.0,
            physical_activity: 3.0,
            last_updated: Utc::now(),
        }
    }
}

// ============================================================================
// SessionStore
// ============================================================================

/// Typed session persistence. Every getter degrades to a default when the
/// key is absent or its JSON is malformed.
pub struct SessionStore {
    backend: Arc<dyn KeyValueBackend>,
}

impl SessionStore {
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self { backend }
    }

    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.backend.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                // Malformed JSON is treated the same as absence
                tracing::warn!(key, error = %e, "stored record unparseable, using default");
                None
            }
        }
    }

    fn put_json<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => self.backend.put(key, &json),
            Err(e) => tracing::warn!(key, error = %e, "failed to serialize record"),
        }
    }

    // --- Current emotional state -------------------------------------------

    /// Plain string label; may be any `EmotionalState` value or one of the
    /// avatar-only render states (`foggy`, `glowing`).
    pub fn current_emotional_state(&self) -> String {
        self.backend
            .get(KEY_CURRENT_EMOTION)
            .unwrap_or_else(|| "neutral".to_string())
    }

    pub fn set_current_emotional_state(&self, emotion: &str) {
        self.backend.put(KEY_CURRENT_EMOTION, emotion);
    }

    // --- Journal -----------------------------------------------------------

    pub fn journal_entries(&self) -> Vec<JournalEntry> {
        self.get_json(KEY_JOURNAL_ENTRIES).unwrap_or_default()
    }

    /// Append a journal entry and update progress (xp, level, streak,
    /// achievements).
    pub fn save_journal_entry(&self, entry: JournalEntry) {
        self.save_journal_entry_at(entry, Utc::now().date_naive());
    }

    /// `save_journal_entry` with "today" injected for determinism.
    pub fn save_journal_entry_at(&self, entry: JournalEntry, today: NaiveDate) {
        let mut entries = self.journal_entries();
        entries.push(entry);
        self.put_json(KEY_JOURNAL_ENTRIES, &entries);
        self.update_progress(&entries, today);
    }

    // --- Progress ----------------------------------------------------------

    pub fn user_progress(&self) -> UserProgress {
        self.get_json(KEY_USER_PROGRESS).unwrap_or_default()
    }

    fn update_progress(&self, entries: &[JournalEntry], today: NaiveDate) {
        let mut progress = self.user_progress();

        progress.total_entries = entries.len();
        progress.xp = entries.len() as u32 * 10;
        progress.level = progress.xp / 100 + 1;

        // Streak advances at most once per calendar day, on a day with an entry
        let today_str = today.to_string();
        if let Some(last) = entries.last() {
            if last.timestamp.date_naive() == today && progress.streaks.last_journal_date != today_str
            {
                progress.streaks.journaling += 1;
                progress.streaks.last_journal_date = today_str;
            }
        }

        update_achievements(&mut progress);
        self.put_json(KEY_USER_PROGRESS, &progress);
    }

    // --- Wellness metrics --------------------------------------------------

    pub fn wellness_metrics(&self) -> WellnessMetrics {
        self.get_json(KEY_WELLNESS_METRICS).unwrap_or_default()
    }

    pub fn save_wellness_metrics(&self, metrics: &WellnessMetrics) {
        self.put_json(KEY_WELLNESS_METRICS, metrics);
    }
}

fn update_achievements(progress: &mut UserProgress) {
    let mut grant = |name: &str| {
        if !progress.achievements.iter().any(|a| a == name) {
            progress.achievements.push(name.to_string());
        }
    };

    if progress.streaks.journaling >= 7 {
        grant("7-Day Journaling Streak");
    }
    if progress.streaks.journaling >= 30 {
        grant("Monthly Warrior");
    }
    if progress.total_entries >= 10 {
        grant("Reflection Master");
    }
    if progress.total_entries >= 50 {
        grant("Journey Explorer");
    }
    if progress.level >= 5 {
        grant("Level 5 Navigator");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use aura_core::{AvatarState, EmotionalState};
    use chrono::TimeZone;

    fn store() -> SessionStore {
        SessionStore::new(Arc::new(MemoryBackend::new()))
    }

    fn entry_on(day: NaiveDate, n: u32) -> JournalEntry {
        let timestamp = Utc
            .from_utc_datetime(&day.and_hms_opt(12, 0, n).unwrap());
        JournalEntry {
            id: format!("entry-{n}"),
            content: "wrote some thoughts".to_string(),
            emotion: "neutral".to_string(),
            timestamp,
            ai_advice: "advice".to_string(),
        }
    }

    #[test]
    fn test_emotional_state_defaults_to_neutral() {
        assert_eq!(store().current_emotional_state(), "neutral");
    }

    #[test]
    fn test_emotional_state_roundtrip_all_labels() {
        let store = store();
        for state in EmotionalState::ALL {
            store.set_current_emotional_state(state.as_str());
            assert_eq!(store.current_emotional_state(), state.as_str());
        }
        // Avatar-only render states are valid stored labels too
        for avatar in [AvatarState::Foggy, AvatarState::Glowing] {
            store.set_current_emotional_state(avatar.as_str());
            assert_eq!(store.current_emotional_state(), avatar.as_str());
        }
    }

    #[test]
    fn test_journal_defaults_empty() {
        assert!(store().journal_entries().is_empty());
        assert_eq!(store().user_progress(), UserProgress::default());
    }

    #[test]
    fn test_save_entry_updates_progress() {
        let store = store();
        let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        store.save_journal_entry_at(entry_on(day, 0), day);

        let progress = store.user_progress();
        assert_eq!(progress.total_entries, 1);
        assert_eq!(progress.xp, 10);
        assert_eq!(progress.level, 1);
        assert_eq!(progress.streaks.journaling, 1);
        assert_eq!(progress.streaks.last_journal_date, day.to_string());
    }

    #[test]
    fn test_streak_advances_once_per_day() {
        let store = store();
        let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        store.save_journal_entry_at(entry_on(day, 0), day);
        store.save_journal_entry_at(entry_on(day, 1), day);

        let progress = store.user_progress();
        assert_eq!(progress.total_entries, 2);
        assert_eq!(progress.streaks.journaling, 1);

        let next = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        store.save_journal_entry_at(entry_on(next, 2), next);
        assert_eq!(store.user_progress().streaks.journaling, 2);
    }

    #[test]
    fn test_level_from_xp() {
        let store = store();
        let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        for n in 0..10 {
            store.save_journal_entry_at(entry_on(day, n), day);
        }
        let progress = store.user_progress();
        assert_eq!(progress.xp, 100);
        assert_eq!(progress.level, 2);
    }

    #[test]
    fn test_achievements_granted_once() {
        let store = store();
        let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        for n in 0..12 {
            store.save_journal_entry_at(entry_on(day, n), day);
        }
        let progress = store.user_progress();
        let count = progress
            .achievements
            .iter()
            .filter(|a| *a == "Reflection Master")
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_malformed_json_falls_back_to_default() {
        let backend = Arc::new(MemoryBackend::new());
        backend.put("auracompass_journal_entries", "{definitely not json");
        backend.put("auracompass_user_progress", "[1, 2, 3]");

        let store = SessionStore::new(backend);
        assert!(store.journal_entries().is_empty());
        assert_eq!(store.user_progress(), UserProgress::default());
    }

    #[test]
    fn test_journal_record_shape_is_camel_case() {
        let store = store();
        let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        store.save_journal_entry_at(entry_on(day, 0), day);

        let backend_store = store.backend.get("auracompass_journal_entries").unwrap();
        assert!(backend_store.contains("\"aiAdvice\""));
        assert!(!backend_store.contains("ai_advice"));

        let progress_raw = store.backend.get("auracompass_user_progress").unwrap();
        assert!(progress_raw.contains("\"totalEntries\""));
        assert!(progress_raw.contains("\"lastJournalDate\""));
    }

    #[test]
    fn test_wellness_metrics_defaults() {
        let metrics = store().wellness_metrics();
        assert_eq!(metrics.sleep, 7.0);
        assert_eq!(metrics.screen_time, 6.0);
        assert_eq!(metrics.work_hours, 8.0);
        assert_eq!(metrics.physical_activity, 3.0);
    }

    #[test]
    fn test_wellness_metrics_roundtrip() {
        let store = store();
        let mut metrics = WellnessMetrics::default();
        metrics.sleep = 8.5;
        store.save_wellness_metrics(&metrics);
        assert_eq!(store.wellness_metrics().sleep, 8.5);
    }
}
