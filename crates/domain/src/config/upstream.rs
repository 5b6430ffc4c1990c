use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// IPv6 block (CIDR) outbound connections draw their source address from.
    /// The prefix length must be a multiple of 16.
    #[serde(default)]
    pub source_block: Option<String>,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// How long a per-destination IPv6 reachability result is trusted.
    #[serde(default = "default_reachability_ttl_secs")]
    pub reachability_ttl_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            source_block: None,
            request_timeout_secs: default_request_timeout_secs(),
            reachability_ttl_secs: default_reachability_ttl_secs(),
        }
    }
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_reachability_ttl_secs() -> u64 {
    1800
}
