use sqlx::SqlitePool;
use tracing::{error, info};
use tubegate_domain::config::CacheConfig;
use tubegate_infrastructure::database::create_pool;

pub async fn init_database(cfg: &CacheConfig) -> anyhow::Result<SqlitePool> {
    info!("Initializing response cache database: {}", cfg.path);

    let pool = create_pool(cfg).await.map_err(|e| {
        error!("Failed to initialize cache pool: {}", e);
        anyhow::anyhow!(e)
    })?;

    info!(
        "Response cache ready (max_entries={}, pool max={})",
        cfg.max_entries, cfg.pool_max_connections,
    );

    Ok(pool)
}
