use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use core_config::AppInfo;
use serde::Serialize;

/// Liveness response with app name and version.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub name: &'static str,
    pub version: &'static str,
}

/// Creates a router with the `/health` liveness endpoint.
///
/// Returns 200 whenever the process is running; readiness checks against
/// backing services belong to the application.
pub fn health_router(app: AppInfo) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(app)
}

async fn health_handler(State(app): State<AppInfo>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy",
        name: app.name,
        version: app.version,
    };

    (StatusCode::OK, Json(response))
}
