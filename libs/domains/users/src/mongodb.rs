//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, to_bson, Bson, Document},
    options::{FindOptions, IndexOptions},
    Collection, Database, IndexModel,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUserRequest, User, UserFilter, UserPage};
use crate::repository::UserRepository;

const USERS_COLLECTION: &str = "users";

/// MongoDB-backed user repository
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: Database) -> Self {
        Self {
            collection: db.collection::<User>(USERS_COLLECTION),
        }
    }

    /// Repository over a custom collection name (used by tests)
    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<User>(collection_name),
        }
    }

    /// Create the unique index on `email`.
    ///
    /// Call once at startup. The index is the hard uniqueness guarantee; the
    /// service-level duplicate check is only a fast path.
    pub async fn ensure_indexes(&self) -> UserResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.collection.create_index(index).await?;
        tracing::info!("Unique email index ensured on {}", USERS_COLLECTION);
        Ok(())
    }

    fn id_filter(id: Uuid) -> Document {
        doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) }
    }

    /// Build the MongoDB filter document for a [`UserFilter`].
    fn build_filter(filter: &UserFilter) -> Document {
        match filter {
            UserFilter::All => doc! {},
            UserFilter::Status(status) => doc! { "status": status.to_string() },
            UserFilter::Search(term) => {
                // Escape the term so it matches as a literal substring
                let pattern = regex::escape(term);
                doc! {
                    "$or": [
                        { "name": { "$regex": pattern.as_str(), "$options": "i" } },
                        { "email": { "$regex": pattern.as_str(), "$options": "i" } },
                    ]
                }
            }
        }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, input), fields(email = %input.email))]
    async fn insert(&self, input: CreateUserRequest) -> UserResult<User> {
        let user = User::new(input);

        // A racing create with the same email fails here on the unique index.
        self.collection.insert_one(&user).await?;

        tracing::info!(user_id = %user.id, "User created");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let user = self.collection.find_one(Self::id_filter(id)).await?;
        Ok(user)
    }

    #[instrument(skip(self, email))]
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let user = self.collection.find_one(doc! { "email": email }).await?;
        Ok(user)
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn update(&self, user: User) -> UserResult<User> {
        let mut updated = user;
        updated.updated_at = Utc::now();

        let result = self
            .collection
            .replace_one(Self::id_filter(updated.id), &updated)
            .await?;
        if result.matched_count == 0 {
            return Err(UserError::NotFound);
        }

        tracing::info!(user_id = %updated.id, "User updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> UserResult<()> {
        let result = self.collection.delete_one(Self::id_filter(id)).await?;
        if result.deleted_count == 0 {
            return Err(UserError::NotFound);
        }

        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_page(
        &self,
        filter: &UserFilter,
        page: u64,
        size: i64,
    ) -> UserResult<UserPage<User>> {
        let mongo_filter = Self::build_filter(filter);
        let size = size.max(1);

        let total = self.collection.count_documents(mongo_filter.clone()).await?;

        // page comes straight from the query string; saturate instead of
        // overflowing on absurd page indexes.
        let options = FindOptions::builder()
            .limit(size)
            .skip(page.saturating_mul(size as u64))
            .sort(doc! { "created_at": -1 })
            .build();

        let cursor = self
            .collection
            .find(mongo_filter)
            .with_options(options)
            .await?;
        let content: Vec<User> = cursor.try_collect().await?;

        Ok(UserPage::new(content, total, page, size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserStatus;

    #[test]
    fn build_filter_all_is_empty() {
        let doc = MongoUserRepository::build_filter(&UserFilter::All);
        assert!(doc.is_empty());
    }

    #[test]
    fn build_filter_status_matches_uppercase_value() {
        let doc = MongoUserRepository::build_filter(&UserFilter::Status(UserStatus::Blocked));
        assert_eq!(doc.get_str("status").unwrap(), "BLOCKED");
    }

    #[test]
    fn build_filter_search_covers_name_and_email() {
        let doc = MongoUserRepository::build_filter(&UserFilter::Search("sai".to_string()));
        let branches = doc.get_array("$or").unwrap();
        assert_eq!(branches.len(), 2);
    }

    #[test]
    fn build_filter_search_escapes_regex_metacharacters() {
        let doc = MongoUserRepository::build_filter(&UserFilter::Search("a+b".to_string()));
        let rendered = format!("{}", doc);
        assert!(rendered.contains("a\\+b"));
    }
}
