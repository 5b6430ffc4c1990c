use crate::ports::IdentityFetcher;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};
use tubegate_domain::{Channel, DomainError, Identity};

#[derive(Debug, Clone)]
pub struct IdentityPoolSettings {
    /// Identities kept per channel before acquirers stop fetching.
    pub min_per_channel: usize,
    /// Cumulative fetch failures after which acquirers stop fetching.
    pub max_fetch_failures: usize,
    pub ttl: Duration,
}

/// Outcome of one rotation sweep.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RotationOutcome {
    pub expired: usize,
    pub rotated: usize,
    pub failed: usize,
    pub pool_size: usize,
}

#[derive(Default)]
struct PoolState {
    identities: Vec<Arc<Identity>>,
    fetch_failures: usize,
}

impl PoolState {
    fn count(&self, channel: Channel) -> usize {
        self.identities
            .iter()
            .filter(|i| i.channel() == channel)
            .count()
    }
}

/// Rotating collection of upstream client identities.
///
/// The lock is never held across a fetch; concurrent acquirers may both fetch,
/// but only as many identities as the channel minimum allows are admitted.
pub struct IdentityPool {
    fetcher: Arc<dyn IdentityFetcher>,
    settings: IdentityPoolSettings,
    state: RwLock<PoolState>,
}

impl IdentityPool {
    pub fn new(fetcher: Arc<dyn IdentityFetcher>, settings: IdentityPoolSettings) -> Self {
        Self {
            fetcher,
            settings,
            state: RwLock::new(PoolState::default()),
        }
    }

    #[instrument(skip(self), fields(channel = %channel))]
    pub async fn acquire(&self, channel: Channel) -> Result<Arc<Identity>, DomainError> {
        let should_fetch = {
            let state = self.state.read().await;
            state.count(channel) < self.settings.min_per_channel
                && state.fetch_failures < self.settings.max_fetch_failures
        };

        if should_fetch {
            debug!("Pool below minimum, fetching new identity");
            match self.fetcher.fetch(channel).await {
                Ok(identity) => {
                    let identity = Arc::new(identity);
                    let mut state = self.state.write().await;
                    if state.count(channel) < self.settings.min_per_channel {
                        state.identities.push(Arc::clone(&identity));
                        info!(
                            token = identity.token_preview(),
                            pool_size = state.identities.len(),
                            "Admitted new identity"
                        );
                    }
                    return Ok(identity);
                }
                Err(e) => {
                    let mut state = self.state.write().await;
                    state.fetch_failures += 1;
                    warn!(
                        error = %e,
                        fetch_failures = state.fetch_failures,
                        "Failed to fetch identity"
                    );
                }
            }
        }

        self.pick(channel).await
    }

    async fn pick(&self, channel: Channel) -> Result<Arc<Identity>, DomainError> {
        let state = self.state.read().await;
        let candidates: Vec<&Arc<Identity>> = state
            .identities
            .iter()
            .filter(|i| i.channel() == channel)
            .collect();

        if candidates.is_empty() {
            return Err(DomainError::NoIdentityAvailable(channel.to_string()));
        }

        Ok(Arc::clone(candidates[fastrand::usize(..candidates.len())]))
    }

    /// Pre-fills every channel up to its minimum. Failures are logged and
    /// left for `acquire` to retry.
    pub async fn warm_up(&self) -> usize {
        for channel in Channel::ALL {
            let missing = {
                let state = self.state.read().await;
                self.settings
                    .min_per_channel
                    .saturating_sub(state.count(channel))
            };

            for _ in 0..missing {
                match self.fetcher.fetch(channel).await {
                    Ok(identity) => {
                        let mut state = self.state.write().await;
                        if state.count(channel) < self.settings.min_per_channel {
                            state.identities.push(Arc::new(identity));
                        }
                    }
                    Err(e) => {
                        warn!(channel = %channel, error = %e, "Identity warm-up fetch failed");
                        break;
                    }
                }
            }
        }

        let size = self.len().await;
        info!(pool_size = size, "Identity pool warmed up");
        size
    }

    /// Replaces every expired identity in place. A replacement is only swapped
    /// in when its slot still holds the identity that was found expired.
    pub async fn rotate_expired(&self) -> RotationOutcome {
        let expired: Vec<(usize, Arc<Identity>)> = {
            let state = self.state.read().await;
            state
                .identities
                .iter()
                .enumerate()
                .filter(|(_, i)| i.is_expired(self.settings.ttl))
                .map(|(slot, i)| (slot, Arc::clone(i)))
                .collect()
        };

        let mut outcome = RotationOutcome {
            expired: expired.len(),
            ..Default::default()
        };

        for (slot, stale) in expired {
            match self.fetcher.fetch(stale.channel()).await {
                Ok(fresh) => {
                    let mut state = self.state.write().await;
                    match state.identities.get_mut(slot) {
                        Some(current) if Arc::ptr_eq(current, &stale) => {
                            info!(
                                channel = %stale.channel(),
                                old = stale.token_preview(),
                                new = fresh.token_preview(),
                                "Rotated expired identity"
                            );
                            *current = Arc::new(fresh);
                            outcome.rotated += 1;
                        }
                        _ => debug!(slot, "Slot changed during rotation, discarding replacement"),
                    }
                }
                Err(e) => {
                    outcome.failed += 1;
                    warn!(
                        channel = %stale.channel(),
                        error = %e,
                        "Failed to fetch replacement identity"
                    );
                }
            }
        }

        outcome.pool_size = self.len().await;
        outcome
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.identities.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn count(&self, channel: Channel) -> usize {
        self.state.read().await.count(channel)
    }

    pub async fn fetch_failures(&self) -> usize {
        self.state.read().await.fetch_failures
    }

    /// Tokens currently held, in slot order.
    #[doc(hidden)]
    pub async fn tokens(&self) -> Vec<String> {
        self.state
            .read()
            .await
            .identities
            .iter()
            .map(|i| i.token().to_string())
            .collect()
    }
}
