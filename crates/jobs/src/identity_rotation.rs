use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use tubegate_application::services::IdentityPool;

const DEFAULT_INTERVAL_SECS: u64 = 60;

/// Periodically replaces expired identities in the pool.
pub struct IdentityRotationJob {
    pool: Arc<IdentityPool>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl IdentityRotationJob {
    pub fn new(pool: Arc<IdentityPool>) -> Self {
        Self {
            pool,
            interval_secs: DEFAULT_INTERVAL_SECS,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, secs: u64) -> Self {
        self.interval_secs = secs;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    /// Runs until the cancellation token fires, abandoning an in-flight sweep.
    pub async fn run(self: Arc<Self>) {
        info!(interval_secs = self.interval_secs, "Starting identity rotation job");

        let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => break,
                _ = interval.tick() => {
                    tokio::select! {
                        _ = self.shutdown.cancelled() => break,
                        outcome = self.pool.rotate_expired() => {
                            if outcome.expired > 0 {
                                info!(
                                    expired = outcome.expired,
                                    rotated = outcome.rotated,
                                    failed = outcome.failed,
                                    pool_size = outcome.pool_size,
                                    "Identity rotation sweep completed"
                                );
                            } else {
                                debug!(pool_size = outcome.pool_size, "No expired identities");
                            }
                        }
                    }
                }
            }
        }

        info!("IdentityRotationJob: shutting down");
    }
}
