pub mod cache;
pub mod health;
pub mod search;

pub use cache::clear_cache;
pub use health::health_check;
pub use search::{search_primary, search_secondary};
