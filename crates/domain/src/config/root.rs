use serde::{Deserialize, Serialize};

use super::cache::CacheConfig;
use super::errors::ConfigError;
use super::identity::IdentityConfig;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::upstream::UpstreamConfig;

const LOCAL_CONFIG_PATH: &str = "tubegate.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/tubegate/config.toml";

/// Main configuration structure for Tubegate
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// HTTP listener
    #[serde(default)]
    pub server: ServerConfig,

    /// Outbound transport towards the upstream platform
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Client identity pool
    #[serde(default)]
    pub identity: IdentityConfig,

    /// Response cache
    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. tubegate.toml in current directory
    /// 3. /etc/tubegate/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(path) = overrides.cache_path {
            self.cache.path = path;
        }
        if overrides.no_cache {
            self.cache.enabled = false;
        }
        if let Some(block) = overrides.source_block {
            self.upstream.source_block = Some(block);
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    ///
    /// A malformed `source_block` is deliberately not rejected here: the
    /// transport falls back to the default source address instead.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("Port cannot be 0".to_string()));
        }

        if self.upstream.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "upstream.request_timeout_secs must be positive".to_string(),
            ));
        }

        if self.identity.rotation_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "identity.rotation_interval_secs must be positive".to_string(),
            ));
        }

        if self.cache.enabled {
            if self.cache.path.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "cache.path cannot be empty when caching is enabled".to_string(),
                ));
            }
            if self.cache.eviction_interval_secs == 0 {
                return Err(ConfigError::Validation(
                    "cache.eviction_interval_secs must be positive".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub bind_address: Option<String>,
    pub cache_path: Option<String>,
    pub no_cache: bool,
    pub source_block: Option<String>,
    pub log_level: Option<String>,
}
