//! Structural request validation.
//!
//! Runs before any persistence access and checks request shape only. Fields
//! are checked in declaration order so the reported violation is
//! deterministic: name before email, blankness before format.

use validator::ValidateEmail;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUserRequest, UpdateUserStatusRequest, UserStatus};

/// Validate a create request.
pub fn validate_create(request: &CreateUserRequest) -> UserResult<()> {
    if request.name.trim().is_empty() {
        return Err(UserError::Validation("Name cannot be empty".to_string()));
    }
    if request.email.trim().is_empty() {
        return Err(UserError::Validation("Email cannot be empty".to_string()));
    }
    if !request.email.validate_email() {
        return Err(UserError::Validation("Invalid email format".to_string()));
    }
    Ok(())
}

/// Validate a status-update request, returning the typed status.
pub fn validate_status_update(request: &UpdateUserStatusRequest) -> UserResult<UserStatus> {
    request
        .status
        .ok_or_else(|| UserError::Validation("Status is required".to_string()))
}
