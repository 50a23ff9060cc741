//! The face-detection session: explicit start/stop lifecycle around an
//! external face-sample source, an interval sampling loop, and fused
//! state broadcast to subscribers.
//!
//! A session is an object owned by the caller — there is no module-level
//! singleton. The sampling loop is the only writer of the sample history,
//! and within a tick ingestion always completes before the majority vote
//! or crisis detector reads the updated history.

use crate::crisis::{CrisisDetector, CrisisSignal};
use crate::history::{EmotionSample, SampleHistory};
use aura_core::{blend, AuraConfig, EmotionalState, FaceEmotion};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, watch, Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

// ============================================================================
// External collaborator
// ============================================================================

/// The external face-detection collaborator (pretrained model + camera).
///
/// Contract: `start` performs model load and camera acquisition; `stop`
/// is idempotent and always safe to call; `sample` runs one detection
/// tick and returns `None` when no face is visible. Implementations must
/// not deliver samples outside of `sample` calls — the session owns the
/// sampling cadence.
#[async_trait]
pub trait FaceSampleSource: Send + Sync + 'static {
    async fn start(&self) -> Result<(), SessionError>;
    async fn stop(&self);
    async fn sample(&self) -> Option<EmotionSample>;
}

/// Acquisition failures, surfaced to the UI as the error string. No
/// automatic retry: the user re-toggles detection explicitly.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SessionError {
    #[error("failed to load face detection models: {0}")]
    ModelLoad(String),
    #[error("camera access denied or not available: {0}")]
    Camera(String),
}

// ============================================================================
// Fusion snapshot
// ============================================================================

/// Fused view broadcast to subscribers after every ingested sample and
/// every text-state change.
#[derive(Debug, Clone)]
pub struct FusionSnapshot {
    /// Majority label over the trailing window, falling back to the most
    /// recent raw sample when the window has a single entry.
    pub current_emotion: Option<FaceEmotion>,
    /// Blend of the text-derived state and the face majority.
    pub display_state: EmotionalState,
    /// Confidence of the most recent sample.
    pub confidence: f64,
    /// Crisis evaluation over the trailing crisis window. Re-triggers
    /// while its preconditions hold; at-most-once presentation gating is
    /// the subscriber's job.
    pub crisis: CrisisSignal,
    pub sample_count: usize,
}

impl FusionSnapshot {
    fn idle(text_state: EmotionalState) -> Self {
        Self {
            current_emotion: None,
            display_state: text_state,
            confidence: 0.0,
            crisis: CrisisSignal::none(),
            sample_count: 0,
        }
    }
}

fn compute_snapshot(
    history: &SampleHistory,
    text_state: EmotionalState,
    detector: &CrisisDetector,
    config: &AuraConfig,
    now_ms: i64,
) -> FusionSnapshot {
    let majority = history.majority_at(config.fusion.majority_window_ms, now_ms);
    let current_emotion = majority.or_else(|| history.latest().map(|s| s.emotion));
    FusionSnapshot {
        current_emotion,
        display_state: blend(text_state, majority),
        confidence: history.latest().map(|s| s.confidence).unwrap_or(0.0),
        crisis: detector.evaluate_at(history, config.fusion.crisis_window_ms, now_ms),
        sample_count: history.len(),
    }
}

// ============================================================================
// DetectionSession
// ============================================================================

struct RunningTask {
    shutdown_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

/// Owns the sampling loop and the fused emotional state for one detection
/// session.
pub struct DetectionSession {
    source: Arc<dyn FaceSampleSource>,
    config: AuraConfig,
    detector: CrisisDetector,
    history: Arc<RwLock<SampleHistory>>,
    text_state: Arc<RwLock<EmotionalState>>,
    snapshot_tx: watch::Sender<FusionSnapshot>,
    snapshot_rx: watch::Receiver<FusionSnapshot>,
    sample_tx: broadcast::Sender<EmotionSample>,
    task: Mutex<Option<RunningTask>>,
}

impl DetectionSession {
    pub fn new(source: Arc<dyn FaceSampleSource>, config: AuraConfig) -> Self {
        let initial = FusionSnapshot::idle(EmotionalState::Neutral);
        let (snapshot_tx, snapshot_rx) = watch::channel(initial);
        let (sample_tx, _) = broadcast::channel(32);
        Self {
            detector: CrisisDetector::new(config.fusion.clone()),
            history: Arc::new(RwLock::new(SampleHistory::from_config(&config.fusion))),
            text_state: Arc::new(RwLock::new(EmotionalState::Neutral)),
            snapshot_tx,
            snapshot_rx,
            sample_tx,
            source,
            config,
            task: Mutex::new(None),
        }
    }

    /// Start the source and the sampling loop. A no-op when already
    /// running. On acquisition failure the camera is released before the
    /// error is returned.
    pub async fn start(&self) -> Result<(), SessionError> {
        let mut task_guard = self.task.lock().await;
        if task_guard.is_some() {
            return Ok(());
        }

        if let Err(e) = self.source.start().await {
            // Scoped acquisition: release whatever was acquired
            self.source.stop().await;
            tracing::warn!(error = %e, "face source failed to start");
            return Err(e);
        }

        self.history.write().await.clear();

        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let source = Arc::clone(&self.source);
        let history = Arc::clone(&self.history);
        let text_state = Arc::clone(&self.text_state);
        let detector = self.detector.clone();
        let config = self.config.clone();
        let snapshot_tx = self.snapshot_tx.clone();
        let sample_tx = self.sample_tx.clone();
        let interval_ms = self.config.detection.sample_interval_ms;

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let Some(sample) = source.sample().await else {
                            continue;
                        };
                        let now_ms = Utc::now().timestamp_millis();

                        // Ingest first; the history is fully updated before
                        // the reads below.
                        {
                            let mut h = history.write().await;
                            h.ingest_at(sample, now_ms);
                        }

                        let text = *text_state.read().await;
                        let snapshot = {
                            let h = history.read().await;
                            compute_snapshot(&h, text, &detector, &config, now_ms)
                        };

                        let _ = sample_tx.send(sample);
                        let _ = snapshot_tx.send(snapshot);
                    }
                    _ = shutdown_rx.changed() => break,
                }
            }
            tracing::debug!("sampling loop stopped");
        });

        *task_guard = Some(RunningTask {
            shutdown_tx,
            handle,
        });
        tracing::debug!(interval_ms, "detection session started");
        Ok(())
    }

    /// Stop sampling and release the camera. Idempotent; when this
    /// returns, no further sample will be ingested and the history has
    /// been reset.
    pub async fn stop(&self) {
        let task = self.task.lock().await.take();
        if let Some(RunningTask {
            shutdown_tx,
            handle,
        }) = task
        {
            let _ = shutdown_tx.send(true);
            let _ = handle.await;
        }

        // Unconditional release, also on paths where the loop never ran
        self.source.stop().await;
        self.history.write().await.clear();

        let text = *self.text_state.read().await;
        let _ = self.snapshot_tx.send(FusionSnapshot::idle(text));
        tracing::debug!("detection session stopped");
    }

    pub async fn is_active(&self) -> bool {
        self.task.lock().await.is_some()
    }

    /// Feed the latest text-derived state into the blender and
    /// re-broadcast the fused snapshot.
    pub async fn set_text_state(&self, state: EmotionalState) {
        {
            let mut text = self.text_state.write().await;
            *text = state;
        }
        let now_ms = Utc::now().timestamp_millis();
        let snapshot = {
            let h = self.history.read().await;
            compute_snapshot(&h, state, &self.detector, &self.config, now_ms)
        };
        let _ = self.snapshot_tx.send(snapshot);
    }

    pub async fn text_state(&self) -> EmotionalState {
        *self.text_state.read().await
    }

    /// Current fused snapshot.
    pub fn snapshot(&self) -> FusionSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Subscribe to fused snapshots.
    pub fn subscribe(&self) -> watch::Receiver<FusionSnapshot> {
        self.snapshot_rx.clone()
    }

    /// Subscribe to raw ingested samples.
    pub fn subscribe_samples(&self) -> broadcast::Receiver<EmotionSample> {
        self.sample_tx.subscribe()
    }
}
