use super::{
    MUSIC_BASE_URL, PLAYER_URL, SEARCH_URL, SONG_FILTER_PARAM, VIDEO_BASE_URL, VIDEO_FILTER_PARAM,
};
use crate::transport::AdaptiveTransport;
use async_trait::async_trait;
use bytes::Bytes;
use fancy_regex::Regex;
use serde_json::{json, Value};
use std::sync::{Arc, LazyLock};
use tracing::{debug, info, instrument};
use tubegate_application::ports::{IdentityFetcher, UpstreamGateway};
use tubegate_domain::{Channel, DomainError, Identity};

static CONTEXT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"["']INNERTUBE_CONTEXT["']\s*:\s*(\{.*)\s*["']INNERTUBE_CONTEXT_CLIENT_NAME["']"#)
        .expect("valid context pattern")
});

/// Pulls the embedded client context document out of a catalog home page.
pub fn extract_context(page: &[u8]) -> Result<Value, DomainError> {
    let text = String::from_utf8_lossy(page);

    let captured = CONTEXT_PATTERN
        .captures(&text)
        .ok()
        .flatten()
        .and_then(|c| c.get(1))
        .ok_or_else(|| {
            DomainError::IdentityRejected("client context not found in page".to_string())
        })?;

    let document = captured.as_str().trim_end().trim_end_matches(',');
    serde_json::from_str(document)
        .map_err(|e| DomainError::IdentityRejected(format!("unreadable client context: {}", e)))
}

/// Client for the upstream internal API, layered on [`AdaptiveTransport`].
pub struct InnertubeClient {
    transport: Arc<AdaptiveTransport>,
}

impl InnertubeClient {
    pub fn new(transport: Arc<AdaptiveTransport>) -> Self {
        Self { transport }
    }

    async fn call(&self, url: &str, payload: Value, identity: &Identity) -> Result<Bytes, DomainError> {
        debug!(visitor = identity.token_preview(), url, "Calling upstream API");
        let connection = self.transport.establish(url).await?;
        connection
            .post_json(url, &payload, Some(identity.token()))
            .await
    }
}

/// Catalog home page that embeds the client context for `channel`.
fn home_page_url(channel: Channel) -> &'static str {
    match channel {
        Channel::Primary => VIDEO_BASE_URL,
        Channel::Secondary => MUSIC_BASE_URL,
    }
}

#[async_trait]
impl IdentityFetcher for InnertubeClient {
    #[instrument(skip(self), fields(channel = %channel))]
    async fn fetch(&self, channel: Channel) -> Result<Identity, DomainError> {
        let url = home_page_url(channel);
        let connection = self.transport.establish(url).await?;
        let page = connection.get(url).await?;

        let identity = Identity::new(extract_context(&page)?, channel)?;
        info!(visitor = identity.token_preview(), "Fetched client context");
        Ok(identity)
    }
}

#[async_trait]
impl UpstreamGateway for InnertubeClient {
    async fn search(
        &self,
        channel: Channel,
        query: &str,
        identity: &Identity,
    ) -> Result<Bytes, DomainError> {
        let params = match channel {
            Channel::Primary => VIDEO_FILTER_PARAM,
            Channel::Secondary => SONG_FILTER_PARAM,
        };
        let payload = json!({
            "context": identity.context(),
            "query": query,
            "params": params,
        });
        self.call(SEARCH_URL, payload, identity).await
    }

    async fn player(&self, video_id: &str, identity: &Identity) -> Result<Bytes, DomainError> {
        let payload = json!({
            "context": identity.context(),
            "videoId": video_id,
        });
        self.call(PLAYER_URL, payload, identity).await
    }
}
