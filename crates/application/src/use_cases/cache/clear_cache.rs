use crate::ports::ResponseCachePort;
use std::sync::Arc;
use tracing::info;
use tubegate_domain::DomainError;

pub struct ClearCacheUseCase {
    cache: Arc<dyn ResponseCachePort>,
}

impl ClearCacheUseCase {
    pub fn new(cache: Arc<dyn ResponseCachePort>) -> Self {
        Self { cache }
    }

    pub async fn execute(&self) -> Result<u64, DomainError> {
        let deleted = self.cache.clear().await?;
        info!(deleted, "Response cache cleared");
        Ok(deleted)
    }
}
