use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::{debug, error, info, instrument};
use tubegate_application::ports::{EvictionOutcome, ResponseCachePort};
use tubegate_domain::{DomainError, Fingerprint};

/// Response cache persisted in the `responses` table.
///
/// A cache built with [`SqliteResponseCache::disabled`] misses every lookup
/// and ignores every write.
pub struct SqliteResponseCache {
    pool: Option<SqlitePool>,
    max_entries: i64,
}

impl SqliteResponseCache {
    /// `max_entries < 0` leaves the cache unbounded.
    pub fn new(pool: SqlitePool, max_entries: i64) -> Self {
        Self {
            pool: Some(pool),
            max_entries,
        }
    }

    pub fn disabled() -> Self {
        Self {
            pool: None,
            max_entries: -1,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }
}

fn unavailable(context: &str, e: sqlx::Error) -> DomainError {
    error!(error = %e, "{}", context);
    DomainError::CacheUnavailable(format!("{}: {}", context, e))
}

#[async_trait]
impl ResponseCachePort for SqliteResponseCache {
    #[instrument(skip(self), fields(key = %fingerprint))]
    async fn lookup(&self, fingerprint: &Fingerprint) -> Result<Option<Vec<u8>>, DomainError> {
        let Some(pool) = &self.pool else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, (Vec<u8>,)>(
            "SELECT payload FROM responses WHERE fingerprint = ?",
        )
        .bind(fingerprint.as_str())
        .fetch_optional(pool)
        .await
        .map_err(|e| unavailable("Failed to look up cached response", e))?;

        if row.is_some() {
            debug!("Cache hit");
        }
        Ok(row.map(|(payload,)| payload))
    }

    #[instrument(skip(self, payload), fields(key = %fingerprint, bytes = payload.len()))]
    async fn store(&self, fingerprint: &Fingerprint, payload: &[u8]) -> Result<(), DomainError> {
        let Some(pool) = &self.pool else {
            return Ok(());
        };

        sqlx::query(
            "INSERT OR REPLACE INTO responses (fingerprint, payload, stored_at) VALUES (?, ?, ?)",
        )
        .bind(fingerprint.as_str())
        .bind(payload)
        .bind(chrono::Utc::now().timestamp_millis())
        .execute(pool)
        .await
        .map_err(|e| unavailable("Failed to store cached response", e))?;

        Ok(())
    }

    async fn enforce_limit(&self) -> Result<EvictionOutcome, DomainError> {
        let Some(pool) = &self.pool else {
            return Ok(EvictionOutcome::default());
        };

        let count = self.count().await?;
        if self.max_entries < 0 || count <= self.max_entries as u64 {
            return Ok(EvictionOutcome { count, deleted: 0 });
        }

        let excess = count - self.max_entries as u64;
        let result = sqlx::query(
            "DELETE FROM responses WHERE fingerprint IN (
                SELECT fingerprint FROM responses ORDER BY stored_at ASC, rowid ASC LIMIT ?
             )",
        )
        .bind(excess as i64)
        .execute(pool)
        .await
        .map_err(|e| unavailable("Failed to evict cached responses", e))?;

        let deleted = result.rows_affected();
        info!(count, deleted, max_entries = self.max_entries, "Evicted oldest cached responses");
        Ok(EvictionOutcome { count, deleted })
    }

    async fn clear(&self) -> Result<u64, DomainError> {
        let Some(pool) = &self.pool else {
            return Ok(0);
        };

        let result = sqlx::query("DELETE FROM responses")
            .execute(pool)
            .await
            .map_err(|e| unavailable("Failed to clear response cache", e))?;

        Ok(result.rows_affected())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let Some(pool) = &self.pool else {
            return Ok(0);
        };

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM responses")
            .fetch_one(pool)
            .await
            .map_err(|e| unavailable("Failed to count cached responses", e))?;

        Ok(count.max(0) as u64)
    }
}
