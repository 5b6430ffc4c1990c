mod cache;
mod search;

pub use cache::ClearCacheResponse;
pub use search::SearchParams;
