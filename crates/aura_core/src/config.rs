use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuraConfig {
    pub fusion: FusionConfig,
    pub detection: DetectionConfig,
}

impl AuraConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let config: AuraConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        Ok(config)
    }

    /// Try to load from path; if the file is missing or invalid, return defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::info!("Config file not found or invalid ({}), using defaults", e);
                Self::default()
            }
        }
    }
}

// ============================================================================
// Sub-configs
// ============================================================================

/// Windows and thresholds for sample aggregation and crisis detection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    /// How long a sample stays in history before age-pruning (default: 10 minutes).
    pub retention_ms: i64,
    /// Hard cap on retained samples, applied after age-pruning (default: 20).
    pub history_cap: usize,
    /// Trailing window for the majority vote (default: 10 seconds).
    pub majority_window_ms: i64,
    /// Trailing window for crisis evaluation (default: 5 minutes).
    pub crisis_window_ms: i64,
    /// Minimum samples in the crisis window before either trigger can fire.
    pub crisis_min_samples: usize,
    /// Negative-emotion ratio at or above which a crisis triggers.
    pub crisis_negative_ratio: f64,
    /// Number of sad samples in the window that triggers on its own.
    pub crisis_sad_streak: usize,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            retention_ms: 600_000,
            history_cap: 20,
            majority_window_ms: 10_000,
            crisis_window_ms: 300_000,
            crisis_min_samples: 5,
            crisis_negative_ratio: 0.8,
            crisis_sad_streak: 4,
        }
    }
}

/// Timing for the detection session and text input analysis.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Interval between face-sample acquisitions (default: 2.5 seconds).
    pub sample_interval_ms: u64,
    /// Quiet period after the last keystroke before text is analyzed.
    pub text_debounce_ms: u64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: 2_500,
            text_debounce_ms: 1_000,
        }
    }
}
