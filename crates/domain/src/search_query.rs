use crate::{Channel, DomainError};
use fancy_regex::Regex;
use std::sync::LazyLock;

const CATALOG_CODE_MARKER: &str = "isrc:";

static CATALOG_CODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z]{2}[A-Z0-9]{3}[0-9]{2}[0-9]{5}$").expect("valid catalog code pattern")
});

static VIDEO_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]{11}$").expect("valid video id pattern"));

/// Where a query is sent after classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryRoute {
    /// Channel-specific search.
    Search { channel: Channel, query: String },
    /// Direct metadata lookup for an 11-character video identifier.
    Direct { video_id: String },
}

/// Classifies a raw query.
///
/// Catalog codes (or `isrc:`-prefixed queries) are forced onto the music
/// catalog with the marker stripped; bare 11-character identifiers bypass
/// search entirely.
pub fn classify_query(channel: Channel, raw: &str) -> Result<QueryRoute, DomainError> {
    if raw.trim().is_empty() {
        return Err(DomainError::InvalidQuery(
            "query parameter is required".to_string(),
        ));
    }

    let mut channel = channel;
    let mut query = raw.to_string();

    let has_marker = raw
        .get(..CATALOG_CODE_MARKER.len())
        .is_some_and(|p| p.eq_ignore_ascii_case(CATALOG_CODE_MARKER));

    if has_marker || matches(&CATALOG_CODE_PATTERN, raw) {
        if has_marker {
            query = raw[CATALOG_CODE_MARKER.len()..].trim().to_string();
        }
        channel = Channel::Secondary;
    }

    if query.is_empty() {
        return Err(DomainError::InvalidQuery(
            "query parameter is required".to_string(),
        ));
    }

    if matches(&VIDEO_ID_PATTERN, &query) {
        return Ok(QueryRoute::Direct { video_id: query });
    }

    Ok(QueryRoute::Search { channel, query })
}

fn matches(pattern: &Regex, text: &str) -> bool {
    pattern.is_match(text).unwrap_or(false)
}
