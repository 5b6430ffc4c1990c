//! Outbound HTTP transport with per-connection source address randomization.
//!
//! Every exchange runs on its own connection. When the destination resolves
//! to IPv6 and a source block is configured, the connection is bound to a
//! fresh random address inside that block.

pub mod reachability;
pub mod resolver;
pub mod source_block;

use bytes::Bytes;
use reachability::ReachabilityCache;
use reqwest::header::{HeaderMap, HeaderValue, CONNECTION, CONTENT_TYPE, COOKIE, USER_AGENT};
use reqwest::{RequestBuilder, Url};
use ring::rand::SystemRandom;
use serde_json::Value;
use source_block::SourceBlock;
use std::net::{IpAddr, Ipv6Addr};
use std::time::Duration;
use tracing::{debug, warn};
use tubegate_domain::{config::UpstreamConfig, DomainError};

pub use reachability::ReachabilityRecord;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/142.0.0.0 Safari/537.36";
const CONSENT_COOKIE: &str = "SOCS=CAI;";
const MUSIC_HOST: &str = "music.youtube.com";
const MUSIC_ORIGIN: &str = "https://music.youtube.com";
const VIDEO_ORIGIN: &str = "https://www.youtube.com";
const API_PATH_MARKER: &str = "youtubei/v1/";
const RESOLVE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct TransportSettings {
    pub source_block: Option<String>,
    pub request_timeout: Duration,
    pub reachability_ttl: Duration,
}

impl From<&UpstreamConfig> for TransportSettings {
    fn from(config: &UpstreamConfig) -> Self {
        Self {
            source_block: config.source_block.clone(),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
            reachability_ttl: Duration::from_secs(config.reachability_ttl_secs),
        }
    }
}

pub struct AdaptiveTransport {
    source_block: Option<SourceBlock>,
    reachability: ReachabilityCache,
    rng: SystemRandom,
    request_timeout: Duration,
}

impl AdaptiveTransport {
    /// A block that fails validation disables randomization; the failure is
    /// logged here once instead of on every connection.
    pub fn new(settings: TransportSettings) -> Self {
        let source_block = match settings.source_block.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(cidr) => match SourceBlock::parse(cidr) {
                Ok(block) => {
                    debug!(block = cidr, "Source address randomization enabled");
                    Some(block)
                }
                Err(e) => {
                    warn!(error = %e, "Using default source address for all connections");
                    None
                }
            },
        };

        Self {
            source_block,
            reachability: ReachabilityCache::new(settings.reachability_ttl, RESOLVE_TIMEOUT),
            rng: SystemRandom::new(),
            request_timeout: settings.request_timeout,
        }
    }

    pub fn randomizes_source(&self) -> bool {
        self.source_block.is_some()
    }

    pub fn reachability(&self) -> &ReachabilityCache {
        &self.reachability
    }

    /// Opens a single-use connection towards the host of `url`.
    pub async fn establish(&self, url: &str) -> Result<Connection, DomainError> {
        let parsed = Url::parse(url)
            .map_err(|e| DomainError::UpstreamUnreachable(format!("invalid url {}: {}", url, e)))?;
        let host = parsed
            .host_str()
            .map(|h| h.trim_start_matches('[').trim_end_matches(']').to_string())
            .ok_or_else(|| DomainError::UpstreamUnreachable(format!("no host in {}", url)))?;
        let port = parsed.port_or_known_default().unwrap_or(443);

        let source = match &self.source_block {
            Some(block) if self.reachability.supports_extended_addressing(&host, port).await => {
                match block.random_address(&self.rng) {
                    Ok(addr) => Some(addr),
                    Err(e) => {
                        warn!(error = %e, "Address synthesis failed, using default source");
                        None
                    }
                }
            }
            _ => None,
        };

        debug!(destination = %format!("{}:{}", host, port), source = ?source, "Establishing connection");

        let mut builder = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(self.request_timeout)
            .pool_max_idle_per_host(0);
        if let Some(addr) = source {
            builder = builder.local_address(IpAddr::V6(addr));
        }
        let client = builder.build().map_err(|e| {
            DomainError::UpstreamUnreachable(format!("failed to build client: {}", e))
        })?;

        Ok(Connection { client, source })
    }
}

/// One-shot HTTP connection. Consumed by the exchange it performs.
pub struct Connection {
    client: reqwest::Client,
    source: Option<Ipv6Addr>,
}

impl Connection {
    pub fn source(&self) -> Option<Ipv6Addr> {
        self.source
    }

    pub async fn get(self, url: &str) -> Result<Bytes, DomainError> {
        let request = self.client.get(url).headers(request_headers(url, None));
        execute(request, url).await
    }

    pub async fn post_json(
        self,
        url: &str,
        body: &Value,
        visitor_token: Option<&str>,
    ) -> Result<Bytes, DomainError> {
        let payload =
            serde_json::to_vec(body).map_err(|e| DomainError::Serialization(e.to_string()))?;
        let request = self
            .client
            .post(url)
            .headers(request_headers(url, visitor_token))
            .body(payload);
        execute(request, url).await
    }
}

async fn execute(request: RequestBuilder, url: &str) -> Result<Bytes, DomainError> {
    let response = request
        .send()
        .await
        .map_err(|e| DomainError::UpstreamUnreachable(format!("request to {} failed: {}", url, e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(DomainError::UpstreamNonSuccess {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.bytes().await.map_err(|e| {
        DomainError::UpstreamUnreachable(format!("failed to read response from {}: {}", url, e))
    })
}

/// Headers the upstream expects from a desktop browser.
pub fn request_headers(url: &str, visitor_token: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::new();

    if url.contains(API_PATH_MARKER) {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = visitor_token.filter(|t| !t.is_empty()) {
            if let Ok(value) = HeaderValue::from_str(token) {
                headers.insert("x-goog-visitor-id", value);
            }
        }
    }

    if url.contains(MUSIC_HOST) {
        headers.insert("x-origin", HeaderValue::from_static(MUSIC_ORIGIN));
    } else {
        headers.insert("origin", HeaderValue::from_static(VIDEO_ORIGIN));
    }

    headers.insert(CONNECTION, HeaderValue::from_static("close"));
    headers.insert(COOKIE, HeaderValue::from_static(CONSENT_COOKIE));
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers
}
