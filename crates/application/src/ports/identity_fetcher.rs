use async_trait::async_trait;
use tubegate_domain::{Channel, DomainError, Identity};

/// Obtains a fresh client identity from the upstream platform.
#[async_trait]
pub trait IdentityFetcher: Send + Sync {
    async fn fetch(&self, channel: Channel) -> Result<Identity, DomainError>;
}
