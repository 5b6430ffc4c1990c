//! Tubegate Domain Layer
pub mod channel;
pub mod config;
pub mod errors;
pub mod fingerprint;
pub mod identity;
pub mod search_query;
pub mod track;

pub use channel::Channel;
pub use config::{CliOverrides, Config, ConfigError};
pub use errors::DomainError;
pub use fingerprint::Fingerprint;
pub use identity::{Identity, IDENTITY_TTL};
pub use search_query::{classify_query, QueryRoute};
pub use track::{Thumbnail, Track, TrackKind};
