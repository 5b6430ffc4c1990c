use super::Services;
use std::sync::Arc;
use tubegate_application::use_cases::{ClearCacheUseCase, SearchTracksUseCase};

pub struct UseCases {
    pub search_tracks: Arc<SearchTracksUseCase>,
    pub clear_cache: Arc<ClearCacheUseCase>,
}

impl UseCases {
    pub fn new(services: &Services) -> Self {
        Self {
            search_tracks: Arc::new(SearchTracksUseCase::new(
                services.identities.clone(),
                services.client.clone(),
                services.parser.clone(),
                services.cache.clone(),
            )),
            clear_cache: Arc::new(ClearCacheUseCase::new(services.cache.clone())),
        }
    }
}
