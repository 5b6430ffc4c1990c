#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use tubegate_application::ports::{
    EvictionOutcome, IdentityFetcher, ResponseCachePort, TrackParser, UpstreamGateway,
};
use tubegate_domain::{Channel, DomainError, Fingerprint, Identity, Thumbnail, Track, TrackKind};

pub fn make_identity(token: &str, channel: Channel) -> Identity {
    Identity::new(json!({ "client": { "visitorData": token } }), channel).unwrap()
}

pub fn make_track(id: &str, kind: TrackKind) -> Track {
    Track {
        title: format!("Title {}", id),
        author: "Artist".to_string(),
        identifier: id.to_string(),
        images: vec![Thumbnail {
            url: format!("https://i.ytimg.com/vi/{}/hqdefault.jpg", id),
            width: 480,
            height: 360,
        }],
        length: 185_000,
        uri: format!("https://music.youtube.com/watch?v={}", id),
        kind,
        views: "1.2M views".to_string(),
        channel_id: "UCartist".to_string(),
        is_live: false,
    }
}

/// Issues sequentially numbered identities; can be switched to failing or
/// to backdate the identities it issues.
#[derive(Default)]
pub struct MockIdentityFetcher {
    calls: AtomicUsize,
    should_fail: AtomicBool,
    issued_at: Mutex<Option<DateTime<Utc>>>,
}

impl MockIdentityFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
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
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::UpstreamUnreachable(
                "connection refused".to_string(),
            ));
        }

        let context = json!({ "client": { "visitorData": format!("{}-{}", channel, n) } });
        let issued_at = *self.issued_at.lock().unwrap();
        match issued_at {
            Some(at) => Identity::issued_at(context, channel, at),
            None => Identity::new(context, channel),
        }
    }
}

/// Returns canned bodies and records every call.
#[derive(Default)]
pub struct MockUpstreamGateway {
    search_bodies: Mutex<HashMap<Channel, Bytes>>,
    player_body: Mutex<Option<Bytes>>,
    search_calls: Mutex<Vec<(Channel, String, String)>>,
    player_calls: Mutex<Vec<(String, Channel)>>,
    failure: Mutex<Option<DomainError>>,
}

impl MockUpstreamGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_search_tracks(&self, channel: Channel, tracks: &[Track]) {
        let body = serde_json::to_vec(tracks).unwrap();
        self.search_bodies
            .lock()
            .unwrap()
            .insert(channel, Bytes::from(body));
    }

    pub fn set_player_track(&self, track: &Track) {
        let body = serde_json::to_vec(track).unwrap();
        *self.player_body.lock().unwrap() = Some(Bytes::from(body));
    }

    pub fn set_failure(&self, error: Option<DomainError>) {
        *self.failure.lock().unwrap() = error;
    }

    pub fn search_calls(&self) -> Vec<(Channel, String, String)> {
        self.search_calls.lock().unwrap().clone()
    }

    pub fn player_calls(&self) -> Vec<(String, Channel)> {
        self.player_calls.lock().unwrap().clone()
    }

    pub fn total_calls(&self) -> usize {
        self.search_calls.lock().unwrap().len() + self.player_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl UpstreamGateway for MockUpstreamGateway {
    async fn search(
        &self,
        channel: Channel,
        query: &str,
        identity: &Identity,
    ) -> Result<Bytes, DomainError> {
        self.search_calls.lock().unwrap().push((
            channel,
            query.to_string(),
            identity.token().to_string(),
        ));
        if let Some(e) = self.failure.lock().unwrap().clone() {
            return Err(e);
        }
        Ok(self
            .search_bodies
            .lock()
            .unwrap()
            .get(&channel)
            .cloned()
            .unwrap_or_else(|| Bytes::from_static(b"[]")))
    }

    async fn player(&self, video_id: &str, identity: &Identity) -> Result<Bytes, DomainError> {
        self.player_calls
            .lock()
            .unwrap()
            .push((video_id.to_string(), identity.channel()));
        if let Some(e) = self.failure.lock().unwrap().clone() {
            return Err(e);
        }
        self.player_body
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| DomainError::EnvelopeMalformed("no player response".to_string()))
    }
}

/// Decodes bodies produced by [`MockUpstreamGateway`].
pub struct JsonTrackParser;

impl TrackParser for JsonTrackParser {
    fn parse_search(&self, _channel: Channel, body: &[u8]) -> Result<Vec<Track>, DomainError> {
        serde_json::from_slice(body).map_err(|e| DomainError::EnvelopeMalformed(e.to_string()))
    }

    fn parse_player(&self, body: &[u8]) -> Result<Track, DomainError> {
        serde_json::from_slice(body).map_err(|e| DomainError::EnvelopeMalformed(e.to_string()))
    }
}

#[derive(Default)]
pub struct InMemoryResponseCache {
    entries: Mutex<HashMap<String, Vec<u8>>>,
    should_fail: AtomicBool,
    stores: AtomicUsize,
}

impl InMemoryResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    pub fn insert_raw(&self, fingerprint: &Fingerprint, payload: &[u8]) {
        self.entries
            .lock()
            .unwrap()
            .insert(fingerprint.to_string(), payload.to_vec());
    }

    pub fn get_raw(&self, fingerprint: &Fingerprint) -> Option<Vec<u8>> {
        self.entries.lock().unwrap().get(fingerprint.as_str()).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn stores(&self) -> usize {
        self.stores.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::CacheUnavailable("database is locked".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ResponseCachePort for InMemoryResponseCache {
    async fn lookup(&self, fingerprint: &Fingerprint) -> Result<Option<Vec<u8>>, DomainError> {
        self.check()?;
        Ok(self.get_raw(fingerprint))
    }

    async fn store(&self, fingerprint: &Fingerprint, payload: &[u8]) -> Result<(), DomainError> {
        self.check()?;
        self.stores.fetch_add(1, Ordering::SeqCst);
        self.insert_raw(fingerprint, payload);
        Ok(())
    }

    async fn enforce_limit(&self) -> Result<EvictionOutcome, DomainError> {
        self.check()?;
        Ok(EvictionOutcome {
            count: self.len() as u64,
            deleted: 0,
        })
    }

    async fn clear(&self) -> Result<u64, DomainError> {
        self.check()?;
        let mut entries = self.entries.lock().unwrap();
        let deleted = entries.len() as u64;
        entries.clear();
        Ok(deleted)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        self.check()?;
        Ok(self.len() as u64)
    }
}
