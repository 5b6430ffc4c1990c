use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;
use tubegate_domain::DomainError;

/// Maps domain failures onto plain-text HTTP responses.
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            DomainError::InvalidQuery(message) => (StatusCode::BAD_REQUEST, message.clone()),
            other => {
                error!(error = %other, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
            }
        };

        (status, message).into_response()
    }
}
