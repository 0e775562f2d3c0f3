//! Unified error handling for the server.

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use vendstock_engine::ErrorKind;

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Engine(#[from] vendstock_engine::Error),

    #[error("Invalid query: {0}")]
    Query(#[from] QueryRejection),
}

/// Error response body.
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Engine(e) => match e.kind() {
                ErrorKind::Validation => {
                    tracing::debug!("Rejected request: {}", e);
                    (StatusCode::BAD_REQUEST, e.to_string())
                }
                ErrorKind::NotFound => (StatusCode::NOT_FOUND, e.to_string()),
                ErrorKind::Store => {
                    tracing::error!("Store error: {:?}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Database error".to_string(),
                    )
                }
            },
            AppError::Query(rejection) => (StatusCode::BAD_REQUEST, rejection.body_text()),
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for handlers.
pub type Result<T> = std::result::Result<T, AppError>;
