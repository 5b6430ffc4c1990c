use crate::{dto::SearchParams, errors::ApiError, state::AppState};
use axum::{
    extract::{Query, State},
    Json,
};
use tracing::{debug, instrument};
use tubegate_domain::{Channel, Track};

#[instrument(skip_all, name = "api_search_primary", fields(query = %params.query))]
pub async fn search_primary(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Track>>, ApiError> {
    search(&state, Channel::Primary, &params.query).await
}

#[instrument(skip_all, name = "api_search_secondary", fields(query = %params.query))]
pub async fn search_secondary(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Track>>, ApiError> {
    search(&state, Channel::Secondary, &params.query).await
}

async fn search(
    state: &AppState,
    channel: Channel,
    query: &str,
) -> Result<Json<Vec<Track>>, ApiError> {
    let tracks = state.search_tracks.execute(channel, query).await?;
    debug!(results = tracks.len(), "Search completed");
    Ok(Json(tracks))
}
