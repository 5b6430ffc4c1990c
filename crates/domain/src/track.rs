use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Thumbnail {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Song,
    Video,
}

/// Track record returned to API clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Track {
    pub title: String,
    pub author: String,
    pub identifier: String,
    pub images: Vec<Thumbnail>,
    /// Duration in milliseconds.
    pub length: u64,
    pub uri: String,
    #[serde(rename = "type")]
    pub kind: TrackKind,
    pub views: String,
    pub channel_id: String,
    pub is_live: bool,
}

/// Parses `h:mm:ss`, `m:ss` or `s` into milliseconds. Unparseable parts count
/// as zero, and so does a duration that overflows.
pub fn parse_duration_text(text: &str) -> u64 {
    let parts: Vec<u64> = text
        .trim()
        .split(':')
        .map(|p| p.trim().parse::<u64>().unwrap_or(0))
        .collect();

    let seconds = match parts.as_slice() {
        [h, m, s] => h
            .checked_mul(3600)
            .and_then(|h| m.checked_mul(60).and_then(|m| h.checked_add(m)))
            .and_then(|hm| hm.checked_add(*s)),
        [m, s] => m.checked_mul(60).and_then(|m| m.checked_add(*s)),
        [s] => Some(*s),
        _ => None,
    };
    seconds.and_then(|s| s.checked_mul(1000)).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_text() {
        assert_eq!(parse_duration_text("3:25"), 205_000);
        assert_eq!(parse_duration_text("1:02:03"), 3_723_000);
        assert_eq!(parse_duration_text("42"), 42_000);
        assert_eq!(parse_duration_text(""), 0);
        assert_eq!(parse_duration_text("LIVE"), 0);
        assert_eq!(parse_duration_text("9999999999999999:00:00"), 0);
        assert_eq!(parse_duration_text("18446744073709551615"), 0);
    }

    #[test]
    fn test_track_serializes_kind_as_type() {
        let track = Track {
            title: "t".into(),
            author: "a".into(),
            identifier: "dQw4w9WgXcQ".into(),
            images: vec![],
            length: 1000,
            uri: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".into(),
            kind: TrackKind::Video,
            views: "1 view".into(),
            channel_id: "UC1".into(),
            is_live: false,
        };
        let json = serde_json::to_value(&track).unwrap();
        assert_eq!(json["type"], "video");
        assert_eq!(json["channel_id"], "UC1");
        assert_eq!(json["is_live"], false);
    }
}
