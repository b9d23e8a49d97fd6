//! Wires the users domain to HTTP routes.

use axum::Router;
use domain_users::{handlers, MongoUserRepository, UserService};
use mongodb::Database;

use crate::state::AppState;

/// Create the users router backed by MongoDB.
pub fn router(state: &AppState) -> Router {
    let repository = MongoUserRepository::new(state.db.clone());
    let service = UserService::new(repository);

    handlers::router(service)
}

/// Create the unique email index. Run once at startup, before serving.
pub async fn init_indexes(db: &Database) -> eyre::Result<()> {
    MongoUserRepository::new(db.clone()).ensure_indexes().await?;
    Ok(())
}
