//! Background uploader for vault envelopes.
//!
//! `submit` hands an envelope to a tokio task and returns immediately.
//! The task uploads with exponential backoff; if several envelopes queue
//! up while it is busy, only the newest one is uploaded.  Failures are
//! logged and never reach the code that saved the vault.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::BackupTarget;

/// Retry behaviour for uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per envelope, including the first.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Cap for the doubling delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Delay to wait after failed attempt number `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.initial_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }
}

/// Handle on the background upload task.
pub struct BackupQueue {
    tx: mpsc::UnboundedSender<Vec<u8>>,
    worker: JoinHandle<()>,
}

impl BackupQueue {
    /// Spawn the upload worker on `runtime`.
    pub fn start(runtime: &Handle, target: Arc<dyn BackupTarget>, policy: RetryPolicy) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = runtime.spawn(run_worker(target, policy, rx));
        Self { tx, worker }
    }

    /// Queue an envelope for upload.  Never blocks and never fails.
    pub fn submit(&self, envelope: Vec<u8>) {
        if self.tx.send(envelope).is_err() {
            warn!("backup worker has stopped; envelope not queued");
        }
    }

    /// Close the queue and wait for pending uploads to finish.
    pub async fn shutdown(self) {
        drop(self.tx);
        if let Err(e) = self.worker.await {
            warn!(error = %e, "backup worker panicked");
        }
    }
}

async fn run_worker(
    target: Arc<dyn BackupTarget>,
    policy: RetryPolicy,
    mut rx: mpsc::UnboundedReceiver<Vec<u8>>,
) {
    while let Some(mut envelope) = rx.recv().await {
        // Only the newest envelope matters.
        while let Ok(newer) = rx.try_recv() {
            envelope = newer;
        }
        upload_with_retry(target.as_ref(), &policy, &envelope).await;
    }
    debug!(backup = target.name(), "backup worker finished");
}

/// Upload one envelope, retrying with backoff.  Returns whether it landed.
pub async fn upload_with_retry(
    target: &dyn BackupTarget,
    policy: &RetryPolicy,
    envelope: &[u8],
) -> bool {
    let attempts = policy.max_attempts.max(1);

    for attempt in 1..=attempts {
        match target.store(envelope).await {
            Ok(()) => {
                info!(backup = target.name(), attempt, "vault backed up");
                return true;
            }
            Err(e) if attempt < attempts => {
                let delay = policy.delay_for(attempt);
                warn!(
                    backup = target.name(),
                    attempt,
                    error = %e,
                    "backup upload failed, retrying in {delay:?}"
                );
                sleep(delay).await;
            }
            Err(e) => {
                warn!(
                    backup = target.name(),
                    attempts,
                    error = %e,
                    "backup upload failed, giving up"
                );
            }
        }
    }
    false
}
