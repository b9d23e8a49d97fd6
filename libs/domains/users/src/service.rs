//! User service - business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{
    CreateUserRequest, ListUsersQuery, UpdateUserStatusRequest, UserFilter, UserPage, UserResponse,
};
use crate::repository::UserRepository;
use crate::validation;

/// User service orchestrating validation, business rules, and repository
/// access. Returns projections, never entities.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a user with status forced to ACTIVE.
    ///
    /// The duplicate-email check here is a fast path for a friendly error;
    /// the store's unique index is what actually guarantees uniqueness under
    /// concurrent creates.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn create_user(&self, input: CreateUserRequest) -> UserResult<UserResponse> {
        validation::validate_create(&input)?;

        if self.repository.find_by_email(&input.email).await?.is_some() {
            return Err(UserError::DuplicateEmail);
        }

        let user = self.repository.insert(input).await?;
        Ok(user.into())
    }

    /// Fetch a user by id.
    #[instrument(skip(self))]
    pub async fn get_user(&self, id: Uuid) -> UserResult<UserResponse> {
        self.repository
            .find_by_id(id)
            .await?
            .map(UserResponse::from)
            .ok_or(UserError::NotFound)
    }

    /// Set a user's status. A no-op transition (same status) is permitted
    /// and still refreshes `updated_at`.
    #[instrument(skip(self, request))]
    pub async fn update_user_status(
        &self,
        id: Uuid,
        request: UpdateUserStatusRequest,
    ) -> UserResult<UserResponse> {
        let status = validation::validate_status_update(&request)?;

        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound)?;

        user.status = status;
        let updated = self.repository.update(user).await?;
        Ok(updated.into())
    }

    /// List users: search term wins over status filter wins over all, sorted
    /// by creation time descending.
    #[instrument(skip(self))]
    pub async fn list_users(&self, query: ListUsersQuery) -> UserResult<UserPage<UserResponse>> {
        let filter = UserFilter::from_params(query.status, query.search.as_deref());

        let page = self
            .repository
            .find_page(&filter, query.page, query.size.max(1))
            .await?;
        Ok(page.map(UserResponse::from))
    }

    /// Hard-delete a user.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: Uuid) -> UserResult<()> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound)?;

        self.repository.delete(id).await
    }
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
