use crate::ports::{ResponseCachePort, TrackParser, UpstreamGateway};
use crate::services::IdentityPool;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use tubegate_domain::{classify_query, Channel, DomainError, Fingerprint, QueryRoute, Track};

/// Dispatches one search: classify, consult the cache, and on a miss query
/// upstream with a pooled identity and cache the parsed result.
pub struct SearchTracksUseCase {
    identities: Arc<IdentityPool>,
    gateway: Arc<dyn UpstreamGateway>,
    parser: Arc<dyn TrackParser>,
    cache: Arc<dyn ResponseCachePort>,
}

impl SearchTracksUseCase {
    pub fn new(
        identities: Arc<IdentityPool>,
        gateway: Arc<dyn UpstreamGateway>,
        parser: Arc<dyn TrackParser>,
        cache: Arc<dyn ResponseCachePort>,
    ) -> Self {
        Self {
            identities,
            gateway,
            parser,
            cache,
        }
    }

    #[instrument(skip(self), fields(channel = %channel))]
    pub async fn execute(&self, channel: Channel, query: &str) -> Result<Vec<Track>, DomainError> {
        match classify_query(channel, query)? {
            QueryRoute::Direct { video_id } => {
                info!(video_id = %video_id, "Direct video identifier detected");
                let track = self.load_video(&video_id).await?;
                Ok(vec![track])
            }
            QueryRoute::Search { channel, query } => self.search(channel, &query).await,
        }
    }

    async fn load_video(&self, video_id: &str) -> Result<Track, DomainError> {
        let identity = self.identities.acquire(Channel::Primary).await?;
        let body = self.gateway.player(video_id, &identity).await?;
        self.parser.parse_player(&body)
    }

    async fn search(&self, channel: Channel, query: &str) -> Result<Vec<Track>, DomainError> {
        let fingerprint = Fingerprint::new(channel, query);

        if let Some(tracks) = self.cached(&fingerprint).await {
            info!(key = %fingerprint, results = tracks.len(), "Returning cached search results");
            return Ok(tracks);
        }

        let start = Instant::now();
        let identity = self.identities.acquire(channel).await?;
        let body = self.gateway.search(channel, query, &identity).await?;
        let tracks = self.parser.parse_search(channel, &body)?;

        debug!(
            results = tracks.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Upstream search completed"
        );

        if !tracks.is_empty() {
            self.populate(&fingerprint, &tracks).await;
        }

        Ok(tracks)
    }

    async fn cached(&self, fingerprint: &Fingerprint) -> Option<Vec<Track>> {
        let payload = match self.cache.lookup(fingerprint).await {
            Ok(Some(payload)) => payload,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, key = %fingerprint, "Cache lookup failed");
                return None;
            }
        };

        match serde_json::from_slice::<Vec<Track>>(&payload) {
            Ok(tracks) => Some(tracks),
            Err(e) => {
                warn!(error = %e, key = %fingerprint, "Discarding undecodable cache entry");
                None
            }
        }
    }

    async fn populate(&self, fingerprint: &Fingerprint, tracks: &[Track]) {
        let payload = match serde_json::to_vec(tracks) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "Failed to encode search results for caching");
                return;
            }
        };

        match self.cache.store(fingerprint, &payload).await {
            Ok(()) => info!(key = %fingerprint, "Stored search results in cache"),
            Err(e) => warn!(error = %e, key = %fingerprint, "Failed to store search results"),
        }
    }
}
