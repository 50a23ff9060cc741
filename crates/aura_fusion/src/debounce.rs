//! Trailing-edge debouncer for keystroke-driven text analysis.
//!
//! Text is only analyzed after the user pauses typing for the configured
//! quiet period; every push cancels and reschedules the pending analysis,
//! and only the latest text is ever classified.

use aura_core::sentiment::{analyze, TextAnalysis};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::sleep;

/// Debounced text analyzer. Push raw text on every keystroke; subscribe
/// to receive one [`TextAnalysis`] per quiet period.
pub struct TextDebouncer {
    input_tx: mpsc::Sender<String>,
    output_rx: watch::Receiver<Option<TextAnalysis>>,
}

impl TextDebouncer {
    /// Spawn the debounce task with the given quiet period.
    pub fn new(quiet: Duration) -> Self {
        let (input_tx, mut input_rx) = mpsc::channel::<String>(64);
        let (output_tx, output_rx) = watch::channel(None);

        tokio::spawn(async move {
            let mut pending: Option<String> = None;
            loop {
                match pending.take() {
                    None => {
                        // Idle: wait for the next keystroke
                        match input_rx.recv().await {
                            Some(text) => pending = Some(text),
                            None => break,
                        }
                    }
                    Some(text) => {
                        tokio::select! {
                            next = input_rx.recv() => match next {
                                // Newer text supersedes the pending one
                                Some(t) => pending = Some(t),
                                None => break,
                            },
                            _ = sleep(quiet) => {
                                let analysis = analyze(&text);
                                tracing::debug!(state = %analysis.state, crisis = analysis.crisis, "debounced text analyzed");
                                let _ = output_tx.send(Some(analysis));
                            }
                        }
                    }
                }
            }
        });

        Self {
            input_tx,
            output_rx,
        }
    }

    /// Feed the current text (called on every keystroke). Resets the
    /// quiet-period timer.
    pub async fn push(&self, text: impl Into<String>) {
        let _ = self.input_tx.send(text.into()).await;
    }

    /// Subscribe to analysis results. Holds `None` until the first quiet
    /// period elapses.
    pub fn subscribe(&self) -> watch::Receiver<Option<TextAnalysis>> {
        self.output_rx.clone()
    }
}
