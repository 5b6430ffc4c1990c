//! Tubegate Infrastructure Layer
//!
//! SQLite response cache, the adaptive outbound transport and the upstream
//! client/parser pair.
pub mod cache;
pub mod database;
pub mod innertube;
pub mod transport;
