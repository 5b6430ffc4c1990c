use serde::{Deserialize, Serialize};
use std::fmt;

/// Upstream catalog a search is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// General video catalog.
    Primary,
    /// Music-only catalog.
    Secondary,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::Primary, Channel::Secondary];

    /// Stable discriminator used when deriving cache fingerprints.
    pub fn discriminator(&self) -> &'static str {
        match self {
            Self::Primary => "0",
            Self::Secondary => "1",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "youtube",
            Self::Secondary => "youtubemusic",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
