use async_trait::async_trait;
use uuid::Uuid;

use crate::error::UserResult;
use crate::models::{CreateUserRequest, User, UserFilter, UserPage};

/// Persistence gateway for users.
///
/// Implementations back this trait with a document store; the MongoDB
/// implementation lives in [`crate::mongodb`]. The store must enforce email
/// uniqueness on insert (unique index) — callers only get a fast-path check.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user; assigns id and both timestamps.
    async fn insert(&self, input: CreateUserRequest) -> UserResult<User>;

    /// Look up a user by id.
    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    /// Look up a user by exact email.
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>>;

    /// Persist a mutation; refreshes `updated_at`, preserves id and
    /// `created_at`.
    async fn update(&self, user: User) -> UserResult<User>;

    /// Hard-delete a user by id; a missing document is a not-found error.
    async fn delete(&self, id: Uuid) -> UserResult<()>;

    /// One page of users matching the filter, sorted by creation time
    /// descending.
    async fn find_page(&self, filter: &UserFilter, page: u64, size: i64)
        -> UserResult<UserPage<User>>;
}
