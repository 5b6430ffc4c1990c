use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IdentityConfig {
    /// Identities kept per channel before acquisition stops fetching new ones.
    #[serde(default = "default_min_per_channel")]
    pub min_per_channel: usize,

    /// Cumulative fetch failures after which acquisition stops fetching.
    /// Defaults to twice `min_per_channel`.
    #[serde(default)]
    pub max_fetch_failures: Option<usize>,

    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    #[serde(default = "default_rotation_interval_secs")]
    pub rotation_interval_secs: u64,
}

impl IdentityConfig {
    pub fn fetch_failure_threshold(&self) -> usize {
        self.max_fetch_failures
            .unwrap_or(self.min_per_channel.saturating_mul(2))
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            min_per_channel: default_min_per_channel(),
            max_fetch_failures: None,
            ttl_secs: default_ttl_secs(),
            rotation_interval_secs: default_rotation_interval_secs(),
        }
    }
}

fn default_min_per_channel() -> usize {
    2
}

fn default_ttl_secs() -> u64 {
    1800
}

fn default_rotation_interval_secs() -> u64 {
    60
}
