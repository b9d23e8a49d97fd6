use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// User account status
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum UserStatus {
    /// Account is active (default at creation)
    #[default]
    Active,
    /// Account is disabled
    Inactive,
    /// Account is blocked
    Blocked,
}

/// User entity - the document stored in MongoDB
///
/// `email` carries a unique index; duplicate inserts fail at the store level
/// even when the application-level existence check races with another create.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier (stored as _id), assigned at creation, never reused
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub status: UserStatus,
    /// Set once at creation
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build a new user from a create request.
    ///
    /// Status is forced to `Active` regardless of input, and both timestamps
    /// start equal.
    pub fn new(input: CreateUserRequest) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            email: input.email,
            status: UserStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Request body for creating a user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

/// Request body for updating a user's status
///
/// `status` is optional at the wire level so that an absent field reaches
/// validation (which rejects it with a stable message) instead of failing
/// deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateUserStatusRequest {
    pub status: Option<UserStatus>,
}

/// Read-only projection of [`User`] returned by the API.
///
/// Contains exactly id, name, email, status, createdAt, updatedAt.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            status: user.status,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Query parameters for listing users
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ListUsersQuery {
    /// Zero-based page index
    #[serde(default)]
    pub page: u64,
    /// Page length
    #[serde(default = "default_size")]
    pub size: i64,
    /// Filter by status; unrecognized values are treated as absent
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: Option<UserStatus>,
    /// Case-insensitive substring match on name or email
    pub search: Option<String>,
}

impl Default for ListUsersQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: default_size(),
            status: None,
            search: None,
        }
    }
}

fn default_size() -> i64 {
    10
}

/// An unrecognized `status` query value is silently treated as absent,
/// matching the upstream parsing behavior this API preserves.
fn lenient_status<'de, D>(deserializer: D) -> Result<Option<UserStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

/// Tagged query shape for the list operation.
///
/// Exactly one of the three variants applies to a query; the precedence rule
/// (search over status over all) lives in [`UserFilter::from_params`] alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserFilter {
    /// Match all users
    All,
    /// Match users with exactly this status
    Status(UserStatus),
    /// Match users whose name or email contains the term, case-insensitive
    Search(String),
}

impl UserFilter {
    /// Select the query shape: a non-blank search term wins over a status
    /// filter, which wins over matching everything.
    pub fn from_params(status: Option<UserStatus>, search: Option<&str>) -> Self {
        match search.map(str::trim).filter(|term| !term.is_empty()) {
            Some(term) => UserFilter::Search(term.to_string()),
            None => match status {
                Some(status) => UserFilter::Status(status),
                None => UserFilter::All,
            },
        }
    }
}

/// One page of an ordered result set plus paging metadata
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPage<T> {
    /// Page content, sorted by creation time descending
    pub content: Vec<T>,
    /// Total matching elements across all pages
    pub total_elements: u64,
    /// Total page count for the requested page length
    pub total_pages: u64,
    /// Zero-based index of this page
    pub page: u64,
}

impl<T> UserPage<T> {
    pub fn new(content: Vec<T>, total_elements: u64, page: u64, size: i64) -> Self {
        let size = size.max(1) as u64;
        Self {
            content,
            total_elements,
            total_pages: total_elements.div_ceil(size),
            page,
        }
    }

    /// Convert page content, keeping the metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> UserPage<U> {
        UserPage {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            page: self.page,
        }
    }
}
