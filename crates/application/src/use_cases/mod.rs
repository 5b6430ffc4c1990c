pub mod cache;
pub mod search;

pub use cache::ClearCacheUseCase;
pub use search::SearchTracksUseCase;
