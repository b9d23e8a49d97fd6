//! HTTP route wiring for the user API.

pub mod readiness;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Create all API routes. These are nested under `/api` by
/// `axum_helpers::create_router`.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/users", users::router(state))
        .merge(readiness::router(state.clone()))
}
