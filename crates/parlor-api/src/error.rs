use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use parlor_db::StoreError;
use parlor_types::api::ActionResponse;

/// Failures surfaced to clients as `{success: false, message}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad input or rejected credentials. Answered with 200 so clients read
    /// the body.
    #[error("{0}")]
    Validation(&'static str),

    /// No session on an API route. Also a 200, like every soft failure.
    #[error("{0}")]
    Unauthorized(&'static str),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(msg) => (StatusCode::OK, *msg),
            ApiError::Unauthorized(msg) => (StatusCode::OK, *msg),
            ApiError::Store(e) => {
                error!("Store error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            ApiError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (status, Json(ActionResponse::failure(message))).into_response()
    }
}
