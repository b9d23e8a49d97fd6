use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found")]
    NotFound,

    #[error("User with this email already exists")]
    DuplicateEmail,

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type UserResult<T> = Result<T, UserError>;

/// Convert UserError to AppError for the standardized error responses.
///
/// Duplicate email is a 400 here (not 409): the API treats it as a caller
/// mistake on the request payload.
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match &err {
            UserError::NotFound => AppError::NotFound(err.to_string()),
            UserError::DuplicateEmail => AppError::BadRequest(err.to_string()),
            UserError::Validation(message) => AppError::BadRequest(message.clone()),
            UserError::Database(message) => AppError::InternalServerError(message.clone()),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// A violated unique index on insert surfaces as the duplicate-email domain
/// error. This is the hard guarantee behind the service-level existence
/// check, which can race with a concurrent create.
impl From<mongodb::error::Error> for UserError {
    fn from(err: mongodb::error::Error) -> Self {
        if is_duplicate_key(&err) {
            UserError::DuplicateEmail
        } else {
            UserError::Database(err.to_string())
        }
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        *err.kind,
        ErrorKind::Write(WriteFailure::WriteError(ref write_error)) if write_error.code == 11000
    )
}
