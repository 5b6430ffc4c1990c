use async_trait::async_trait;
use bytes::Bytes;
use tubegate_domain::{Channel, DomainError, Identity};

/// Raw calls against the upstream search API. Implementations return the
/// response body untouched; interpretation belongs to [`super::TrackParser`].
#[async_trait]
pub trait UpstreamGateway: Send + Sync {
    async fn search(
        &self,
        channel: Channel,
        query: &str,
        identity: &Identity,
    ) -> Result<Bytes, DomainError>;

    async fn player(&self, video_id: &str, identity: &Identity) -> Result<Bytes, DomainError>;
}
