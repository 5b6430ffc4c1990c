use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tubegate_application::ports::{EvictionOutcome, ResponseCachePort};
use tubegate_domain::{Channel, Fingerprint};
use tubegate_infrastructure::cache::SqliteResponseCache;
use tubegate_infrastructure::database::run_migrations;

async fn create_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}

fn key(query: &str) -> Fingerprint {
    Fingerprint::new(Channel::Secondary, query)
}

async fn stored_keys(pool: &SqlitePool) -> Vec<String> {
    sqlx::query_as::<_, (String,)>("SELECT fingerprint FROM responses ORDER BY rowid")
        .fetch_all(pool)
        .await
        .unwrap()
        .into_iter()
        .map(|(k,)| k)
        .collect()
}

#[tokio::test]
async fn test_store_then_lookup_returns_identical_bytes() {
    let cache = SqliteResponseCache::new(create_test_db().await, -1);
    let payload = br#"[{"title":"Lofi","identifier":"abc"}]"#;

    cache.store(&key("lofi beats"), payload).await.unwrap();

    let found = cache.lookup(&key("lofi beats")).await.unwrap();
    assert_eq!(found.as_deref(), Some(&payload[..]));
}

#[tokio::test]
async fn test_lookup_miss_returns_none() {
    let cache = SqliteResponseCache::new(create_test_db().await, -1);
    assert!(cache.lookup(&key("unknown")).await.unwrap().is_none());
}

#[tokio::test]
async fn test_lookup_is_shared_across_surface_variants() {
    let cache = SqliteResponseCache::new(create_test_db().await, -1);
    cache.store(&key(" Lofi Beats "), b"[]").await.unwrap();

    assert!(cache.lookup(&key("lofi beats")).await.unwrap().is_some());
    assert!(cache
        .lookup(&Fingerprint::new(Channel::Primary, "lofi beats"))
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_store_replaces_existing_entry() {
    let cache = SqliteResponseCache::new(create_test_db().await, -1);

    cache.store(&key("q"), b"first").await.unwrap();
    cache.store(&key("q"), b"second").await.unwrap();

    assert_eq!(cache.count().await.unwrap(), 1);
    assert_eq!(
        cache.lookup(&key("q")).await.unwrap().as_deref(),
        Some(&b"second"[..])
    );
}

#[tokio::test]
async fn test_enforce_limit_removes_oldest_entries() {
    let pool = create_test_db().await;
    let cache = SqliteResponseCache::new(pool.clone(), 3);

    for q in ["one", "two", "three", "four", "five"] {
        cache.store(&key(q), q.as_bytes()).await.unwrap();
    }

    let outcome = cache.enforce_limit().await.unwrap();

    assert_eq!(outcome, EvictionOutcome { count: 5, deleted: 2 });
    assert_eq!(cache.count().await.unwrap(), 3);
    assert!(cache.lookup(&key("one")).await.unwrap().is_none());
    assert!(cache.lookup(&key("two")).await.unwrap().is_none());
    assert_eq!(
        stored_keys(&pool).await,
        vec![key("three").to_string(), key("four").to_string(), key("five").to_string()]
    );
}

#[tokio::test]
async fn test_enforce_limit_orders_by_stored_at() {
    let pool = create_test_db().await;
    let cache = SqliteResponseCache::new(pool.clone(), 1);

    for (q, stored_at) in [("newest", 3_000i64), ("oldest", 1_000), ("middle", 2_000)] {
        sqlx::query("INSERT INTO responses (fingerprint, payload, stored_at) VALUES (?, ?, ?)")
            .bind(key(q).as_str())
            .bind(q.as_bytes())
            .bind(stored_at)
            .execute(&pool)
            .await
            .unwrap();
    }

    let outcome = cache.enforce_limit().await.unwrap();

    assert_eq!(outcome.deleted, 2);
    assert_eq!(stored_keys(&pool).await, vec![key("newest").to_string()]);
}

#[tokio::test]
async fn test_replaced_entry_counts_as_newest() {
    let cache = SqliteResponseCache::new(create_test_db().await, 2);

    cache.store(&key("a"), b"a").await.unwrap();
    cache.store(&key("b"), b"b").await.unwrap();
    cache.store(&key("c"), b"c").await.unwrap();
    cache.store(&key("a"), b"a2").await.unwrap();

    cache.enforce_limit().await.unwrap();

    assert!(cache.lookup(&key("a")).await.unwrap().is_some());
    assert!(cache.lookup(&key("b")).await.unwrap().is_none());
    assert!(cache.lookup(&key("c")).await.unwrap().is_some());
}

#[tokio::test]
async fn test_enforce_limit_within_capacity_is_noop() {
    let cache = SqliteResponseCache::new(create_test_db().await, 10);
    cache.store(&key("a"), b"a").await.unwrap();

    let outcome = cache.enforce_limit().await.unwrap();

    assert_eq!(outcome, EvictionOutcome { count: 1, deleted: 0 });
}

#[tokio::test]
async fn test_negative_limit_is_unbounded() {
    let cache = SqliteResponseCache::new(create_test_db().await, -1);
    for i in 0..20 {
        cache.store(&key(&format!("q{}", i)), b"x").await.unwrap();
    }

    let outcome = cache.enforce_limit().await.unwrap();

    assert_eq!(outcome.deleted, 0);
    assert_eq!(cache.count().await.unwrap(), 20);
}

#[tokio::test]
async fn test_zero_limit_empties_cache() {
    let cache = SqliteResponseCache::new(create_test_db().await, 0);
    cache.store(&key("a"), b"a").await.unwrap();
    cache.store(&key("b"), b"b").await.unwrap();

    let outcome = cache.enforce_limit().await.unwrap();

    assert_eq!(outcome.deleted, 2);
    assert_eq!(cache.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_clear_deletes_everything() {
    let cache = SqliteResponseCache::new(create_test_db().await, -1);
    cache.store(&key("a"), b"a").await.unwrap();
    cache.store(&key("b"), b"b").await.unwrap();

    assert_eq!(cache.clear().await.unwrap(), 2);
    assert_eq!(cache.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_disabled_cache_is_a_silent_noop() {
    let cache = SqliteResponseCache::disabled();
    assert!(!cache.is_enabled());

    cache.store(&key("a"), b"payload").await.unwrap();

    assert!(cache.lookup(&key("a")).await.unwrap().is_none());
    assert_eq!(cache.count().await.unwrap(), 0);
    assert_eq!(cache.enforce_limit().await.unwrap(), EvictionOutcome::default());
    assert_eq!(cache.clear().await.unwrap(), 0);
}

#[tokio::test]
async fn test_closed_pool_reports_cache_unavailable() {
    let pool = create_test_db().await;
    let cache = SqliteResponseCache::new(pool.clone(), -1);
    pool.close().await;

    let result = cache.lookup(&key("a")).await;
    assert!(matches!(
        result,
        Err(tubegate_domain::DomainError::CacheUnavailable(_))
    ));
}
