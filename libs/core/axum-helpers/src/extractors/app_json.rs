//! JSON body extractor with `{"message": ...}` shaped rejections.

use crate::errors::ErrorResponse;
use axum::{
    extract::{FromRequest, Json, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

/// JSON body extractor.
///
/// Behaves like [`axum::Json`] but rejects malformed bodies with the
/// standard error response shape instead of a plain-text body.
///
/// # Example
/// ```ignore
/// async fn create_user(AppJson(payload): AppJson<CreateUserRequest>) { /* ... */ }
/// ```
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(data)) => Ok(AppJson(data)),
            Err(rejection) => {
                tracing::info!("JSON extraction failed: {}", rejection.body_text());
                let body = axum::Json(ErrorResponse::new(rejection.body_text()));
                Err((StatusCode::BAD_REQUEST, body).into_response())
            }
        }
    }
}
