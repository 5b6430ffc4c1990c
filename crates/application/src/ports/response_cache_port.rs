use async_trait::async_trait;
use tubegate_domain::{DomainError, Fingerprint};

/// Outcome of a capacity sweep.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EvictionOutcome {
    /// Entry count observed before deleting.
    pub count: u64,
    pub deleted: u64,
}

/// Port for the persisted response cache.
#[async_trait]
pub trait ResponseCachePort: Send + Sync {
    async fn lookup(&self, fingerprint: &Fingerprint) -> Result<Option<Vec<u8>>, DomainError>;

    /// Insert or replace the payload stored under `fingerprint`.
    async fn store(&self, fingerprint: &Fingerprint, payload: &[u8]) -> Result<(), DomainError>;

    /// Delete the oldest entries until the configured capacity holds.
    async fn enforce_limit(&self) -> Result<EvictionOutcome, DomainError>;

    async fn clear(&self) -> Result<u64, DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;
}
