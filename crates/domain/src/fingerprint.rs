use crate::Channel;
use std::fmt;

/// Canonical cache key for a search request.
///
/// The query is trimmed and lower-cased, then combined with the channel
/// discriminator as sorted, form-encoded key/value pairs, so requests that
/// only differ in casing or surrounding whitespace share one fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn new(channel: Channel, query: &str) -> Self {
        let normalized = normalize(query);
        let mut pairs = [
            ("search_type", channel.discriminator().to_string()),
            ("query", normalized),
        ];
        pairs.sort_by(|a, b| a.0.cmp(b.0));

        let encoded = pairs
            .iter()
            .map(|(k, v)| format!("{}={}", form_encode(k), form_encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        Self(encoded)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn normalize(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Query-component escaping: spaces become `+`.
fn form_encode(value: &str) -> String {
    urlencoding::encode(value).replace("%20", "+")
}
