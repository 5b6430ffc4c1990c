use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Upstream unreachable: {0}")]
    UpstreamUnreachable(String),

    #[error("Upstream {url} returned HTTP {status}")]
    UpstreamNonSuccess { url: String, status: u16 },

    #[error("Malformed upstream response: {0}")]
    EnvelopeMalformed(String),

    #[error("Skipping record: {0}")]
    RecordParse(String),

    #[error("Response cache unavailable: {0}")]
    CacheUnavailable(String),

    #[error("No client identity available for {0}")]
    NoIdentityAvailable(String),

    #[error("Source address block misconfigured: {0}")]
    AddressBlockMisconfigured(String),

    #[error("Identity rejected: {0}")]
    IdentityRejected(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}
