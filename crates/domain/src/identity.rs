use crate::{Channel, DomainError};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::time::Duration;

/// Default lifetime of an identity before rotation replaces it.
pub const IDENTITY_TTL: Duration = Duration::from_secs(30 * 60);

const TOKEN_LOG_PREFIX: usize = 50;

/// Upstream-issued client context used to vary the apparent origin of requests.
#[derive(Debug, Clone)]
pub struct Identity {
    context: Value,
    token: String,
    created_at: DateTime<Utc>,
    channel: Channel,
}

impl Identity {
    /// Builds an identity from the context document, rejecting documents
    /// without a usable `client.visitorData` token.
    pub fn new(context: Value, channel: Channel) -> Result<Self, DomainError> {
        Self::issued_at(context, channel, Utc::now())
    }

    pub fn issued_at(
        context: Value,
        channel: Channel,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let token = context
            .pointer("/client/visitorData")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                DomainError::IdentityRejected(
                    "context document has no client.visitorData".to_string(),
                )
            })?
            .to_string();

        Ok(Self {
            context,
            token,
            created_at,
            channel,
        })
    }

    pub fn context(&self) -> &Value {
        &self.context
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Token shortened for log output.
    pub fn token_preview(&self) -> &str {
        match self.token.char_indices().nth(TOKEN_LOG_PREFIX) {
            Some((idx, _)) => &self.token[..idx],
            None => &self.token,
        }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.is_expired_at(Utc::now(), ttl)
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let age = now.signed_duration_since(self.created_at);
        match age.to_std() {
            Ok(age) => age >= ttl,
            Err(_) => false,
        }
    }
}
