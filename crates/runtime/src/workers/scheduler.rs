//! Tokio-backed [`Scheduler`] for the session worker.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use game_core::{Scheduler, Wake};

/// Delivers wakes back to the session worker after a (scaled) delay.
///
/// The engine only ever honours its most recent wake, so a new request aborts
/// the pending timer. Dropping the scheduler aborts it too.
pub struct TokioScheduler {
    wake_tx: mpsc::UnboundedSender<Wake>,
    pace_scale: f64,
    pending: Option<JoinHandle<()>>,
}

impl TokioScheduler {
    pub fn new(wake_tx: mpsc::UnboundedSender<Wake>, pace_scale: f64) -> Self {
        Self {
            wake_tx,
            pace_scale: pace_scale.max(0.0),
            pending: None,
        }
    }

    fn scaled(&self, delay_ms: u64) -> Duration {
        Duration::from_millis((delay_ms as f64 * self.pace_scale).round() as u64)
    }

    /// Aborts the pending timer, if any.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, delay_ms: u64, wake: Wake) {
        self.cancel();

        let delay = self.scaled(delay_ms);
        if delay.is_zero() {
            if self.wake_tx.send(wake).is_err() {
                tracing::debug!(target: "runtime::scheduler", "wake receiver dropped");
            }
            return;
        }

        let wake_tx = self.wake_tx.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the session ended; nothing to deliver.
            let _ = wake_tx.send(wake);
        }));
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
