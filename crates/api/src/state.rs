use std::sync::Arc;
use tubegate_application::use_cases::{ClearCacheUseCase, SearchTracksUseCase};

#[derive(Clone)]
pub struct AppState {
    pub search_tracks: Arc<SearchTracksUseCase>,
    pub clear_cache: Arc<ClearCacheUseCase>,
}
