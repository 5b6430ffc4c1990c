use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;
use tubegate_application::ports::ResponseCachePort;
use tubegate_application::services::{IdentityPool, IdentityPoolSettings};
use tubegate_domain::Config;
use tubegate_infrastructure::cache::SqliteResponseCache;
use tubegate_infrastructure::innertube::{InnertubeClient, InnertubeParser};
use tubegate_infrastructure::transport::{AdaptiveTransport, TransportSettings};

pub struct Services {
    pub identities: Arc<IdentityPool>,
    pub client: Arc<InnertubeClient>,
    pub parser: Arc<InnertubeParser>,
    pub cache: Arc<dyn ResponseCachePort>,
}

impl Services {
    pub fn new(config: &Config, pool: Option<SqlitePool>) -> Self {
        let transport = Arc::new(AdaptiveTransport::new(TransportSettings::from(
            &config.upstream,
        )));
        let client = Arc::new(InnertubeClient::new(transport));

        let identities = Arc::new(IdentityPool::new(
            client.clone(),
            IdentityPoolSettings {
                min_per_channel: config.identity.min_per_channel,
                max_fetch_failures: config.identity.fetch_failure_threshold(),
                ttl: Duration::from_secs(config.identity.ttl_secs),
            },
        ));

        let cache: Arc<dyn ResponseCachePort> = match pool {
            Some(pool) => Arc::new(SqliteResponseCache::new(pool, config.cache.max_entries)),
            None => Arc::new(SqliteResponseCache::disabled()),
        };

        Self {
            identities,
            client,
            parser: Arc::new(InnertubeParser::new()),
            cache,
        }
    }
}
