mod identity_fetcher;
mod response_cache_port;
mod track_parser;
mod upstream_gateway;

pub use identity_fetcher::IdentityFetcher;
pub use response_cache_port::{EvictionOutcome, ResponseCachePort};
pub use track_parser::TrackParser;
pub use upstream_gateway::UpstreamGateway;
