//! Readiness endpoint

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct ReadinessResponse {
    status: String,
    mongodb: bool,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// Verifies the MongoDB connection is usable.
async fn readiness_check(State(state): State<AppState>) -> Json<ReadinessResponse> {
    let mongodb_healthy = database::mongodb::check_health(&state.mongo_client).await;

    Json(ReadinessResponse {
        status: if mongodb_healthy { "ready" } else { "unhealthy" }.to_string(),
        mongodb: mongodb_healthy,
    })
}
