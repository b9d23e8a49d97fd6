use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Message returned for any unexpected failure. Internal detail is logged,
/// never surfaced to clients.
pub const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong";

/// Standard error response body.
///
/// Every error response carries this shape:
///
/// ```json
/// {
///   "message": "User not found"
/// }
/// ```
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Application error type that converts to HTTP responses.
///
/// This is the single translation boundary between domain failures and the
/// wire: domain crates convert their error kinds into `AppError` and nothing
/// downstream inspects error kinds again.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => {
                tracing::info!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, msg)
            }
            AppError::NotFound(msg) => {
                tracing::info!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, msg)
            }
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

/// Fallback handler for unmatched routes.
pub async fn not_found() -> Response {
    let body = Json(ErrorResponse::new("The requested resource was not found"));
    (StatusCode::NOT_FOUND, body).into_response()
}
