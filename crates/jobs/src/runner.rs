use crate::{CacheLimitJob, IdentityRotationJob};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

pub trait SpawnableJob: Send + Sync + 'static {
    fn with_cancellation(self, token: CancellationToken) -> Self;
    fn start_job(self: Arc<Self>) -> JoinHandle<()>;
}

macro_rules! impl_spawnable_job {
    ($t:ty) => {
        impl SpawnableJob for $t {
            fn with_cancellation(self, token: CancellationToken) -> Self {
                self.with_cancellation(token)
            }

            fn start_job(self: Arc<Self>) -> JoinHandle<()> {
                tokio::spawn(async move { self.run().await })
            }
        }
    };
}

impl_spawnable_job!(IdentityRotationJob);
impl_spawnable_job!(CacheLimitJob);

fn spawn_job<J: SpawnableJob>(
    job: Option<J>,
    shutdown: &Option<CancellationToken>,
    handles: &mut Vec<JoinHandle<()>>,
) {
    if let Some(job) = job {
        let job = match shutdown {
            Some(token) => job.with_cancellation(token.clone()),
            None => job,
        };
        handles.push(Arc::new(job).start_job());
    }
}

pub struct JobRunner {
    identity_rotation: Option<IdentityRotationJob>,
    cache_limit: Option<CacheLimitJob>,
    shutdown: Option<CancellationToken>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self {
            identity_rotation: None,
            cache_limit: None,
            shutdown: None,
        }
    }

    pub fn with_identity_rotation(mut self, job: IdentityRotationJob) -> Self {
        self.identity_rotation = Some(job);
        self
    }

    pub fn with_cache_limit(mut self, job: CacheLimitJob) -> Self {
        self.cache_limit = Some(job);
        self
    }

    pub fn with_shutdown_token(mut self, token: CancellationToken) -> Self {
        self.shutdown = Some(token);
        self
    }

    /// Spawns every configured job. The handles complete once the shutdown
    /// token is cancelled.
    pub async fn start(self) -> Vec<JoinHandle<()>> {
        info!("Starting background job runner");

        let mut handles = Vec::new();
        spawn_job(self.identity_rotation, &self.shutdown, &mut handles);
        spawn_job(self.cache_limit, &self.shutdown, &mut handles);

        info!(jobs = handles.len(), "All background jobs started");
        handles
    }
}

/// Awaits every job handle, logging the ones that panicked or were aborted.
/// Returns how many ended abnormally.
pub async fn join_all(handles: Vec<JoinHandle<()>>) -> usize {
    let mut abnormal = 0;
    for handle in handles {
        if let Err(e) = handle.await {
            warn!(error = %e, "Background job ended abnormally");
            abnormal += 1;
        }
    }
    abnormal
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}
