use crate::{dto::ClearCacheResponse, errors::ApiError, state::AppState};
use axum::{extract::State, Json};
use tracing::instrument;

#[instrument(skip(state), name = "api_clear_cache")]
pub async fn clear_cache(
    State(state): State<AppState>,
) -> Result<Json<ClearCacheResponse>, ApiError> {
    let deleted = state.clear_cache.execute().await?;
    Ok(Json(ClearCacheResponse { deleted }))
}
