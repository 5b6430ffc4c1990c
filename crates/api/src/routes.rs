use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get},
    Router,
};

pub fn create_api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/youtube/search", get(handlers::search_primary))
        .route("/youtubemusic/search", get(handlers::search_secondary))
        .route("/cache", delete(handlers::clear_cache))
        .with_state(state)
}
