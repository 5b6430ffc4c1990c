use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};
use tubegate_application::ports::ResponseCachePort;

const DEFAULT_INTERVAL_SECS: u64 = 60;

/// Periodically trims the response cache down to its configured capacity.
pub struct CacheLimitJob {
    cache: Arc<dyn ResponseCachePort>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl CacheLimitJob {
    pub fn new(cache: Arc<dyn ResponseCachePort>) -> Self {
        Self {
            cache,
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

    pub async fn run(self: Arc<Self>) {
        info!(interval_secs = self.interval_secs, "Starting cache limit job");

        let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => break,
                _ = interval.tick() => {
                    tokio::select! {
                        _ = self.shutdown.cancelled() => break,
                        result = self.cache.enforce_limit() => match result {
                            Ok(outcome) if outcome.deleted > 0 => {
                                info!(
                                    count = outcome.count,
                                    deleted = outcome.deleted,
                                    "Cache limit enforced"
                                );
                            }
                            Ok(outcome) => debug!(count = outcome.count, "Cache within limit"),
                            Err(e) => error!(error = %e, "Cache limit sweep failed"),
                        }
                    }
                }
            }
        }

        info!("CacheLimitJob: shutting down");
    }
}
