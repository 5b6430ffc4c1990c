use tubegate_domain::{Channel, DomainError, Track};

/// Maps upstream response bodies onto [`Track`] records.
///
/// `parse_search` fails only when the response envelope itself is unusable;
/// individual malformed records are skipped.
pub trait TrackParser: Send + Sync {
    fn parse_search(&self, channel: Channel, body: &[u8]) -> Result<Vec<Track>, DomainError>;

    fn parse_player(&self, body: &[u8]) -> Result<Track, DomainError>;
}
