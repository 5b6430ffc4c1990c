#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use tubegate_application::ports::{EvictionOutcome, IdentityFetcher, ResponseCachePort};
use tubegate_domain::{Channel, DomainError, Fingerprint, Identity};

#[derive(Default)]
pub struct MockIdentityFetcher {
    calls: AtomicUsize,
    hang: AtomicBool,
    issued_at: Mutex<Option<DateTime<Utc>>>,
}

impl MockIdentityFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subsequent fetches never complete.
    pub fn set_hang(&self, hang: bool) {
        self.hang.store(hang, Ordering::SeqCst);
    }

    pub fn set_issued_at(&self, at: Option<DateTime<Utc>>) {
        *self.issued_at.lock().unwrap() = at;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityFetcher for MockIdentityFetcher {
    async fn fetch(&self, channel: Channel) -> Result<Identity, DomainError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.hang.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }

        let context = json!({ "client": { "visitorData": format!("{}-{}", channel, n) } });
        let issued_at = *self.issued_at.lock().unwrap();
        match issued_at {
            Some(at) => Identity::issued_at(context, channel, at),
            None => Identity::new(context, channel),
        }
    }
}

#[derive(Default)]
pub struct MockResponseCache {
    sweeps: AtomicUsize,
    should_fail: AtomicBool,
    hang: AtomicBool,
}

impl MockResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    pub fn set_hang(&self, hang: bool) {
        self.hang.store(hang, Ordering::SeqCst);
    }

    pub fn sweeps(&self) -> usize {
        self.sweeps.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResponseCachePort for MockResponseCache {
    async fn lookup(&self, _fingerprint: &Fingerprint) -> Result<Option<Vec<u8>>, DomainError> {
        Ok(None)
    }

    async fn store(&self, _fingerprint: &Fingerprint, _payload: &[u8]) -> Result<(), DomainError> {
        Ok(())
    }

    async fn enforce_limit(&self) -> Result<EvictionOutcome, DomainError> {
        self.sweeps.fetch_add(1, Ordering::SeqCst);
        if self.hang.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::CacheUnavailable("disk I/O error".to_string()));
        }
        Ok(EvictionOutcome {
            count: 10,
            deleted: 2,
        })
    }

    async fn clear(&self) -> Result<u64, DomainError> {
        Ok(0)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(0)
    }
}
