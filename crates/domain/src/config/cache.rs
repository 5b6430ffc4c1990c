use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_cache_path")]
    pub path: String,

    /// Maximum number of cached responses. Negative means unbounded.
    #[serde(default = "default_max_entries")]
    pub max_entries: i64,

    #[serde(default = "default_eviction_interval_secs")]
    pub eviction_interval_secs: u64,

    #[serde(default = "default_busy_timeout_secs")]
    pub busy_timeout_secs: u64,

    #[serde(default = "default_pool_max_connections")]
    pub pool_max_connections: u32,
}

impl CacheConfig {
    pub fn database_url(&self) -> String {
        format!("sqlite:{}", self.path)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: default_cache_path(),
            max_entries: default_max_entries(),
            eviction_interval_secs: default_eviction_interval_secs(),
            busy_timeout_secs: default_busy_timeout_secs(),
            pool_max_connections: default_pool_max_connections(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_cache_path() -> String {
    "./tubegate-cache.db".to_string()
}

fn default_max_entries() -> i64 {
    -1
}

fn default_eviction_interval_secs() -> u64 {
    60
}

fn default_busy_timeout_secs() -> u64 {
    5
}

fn default_pool_max_connections() -> u32 {
    8
}
