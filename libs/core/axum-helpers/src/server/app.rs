use super::shutdown::shutdown_signal;
use crate::errors::not_found;
use axum::Router;
use core_config::server::ServerConfig;
use std::io;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{info, Level};
use utoipa::OpenApi;

/// Starts the Axum server with graceful shutdown.
///
/// Binds to the configured address and serves until SIGINT/SIGTERM.
///
/// # Errors
/// Returns an error if the listener fails to bind or the server errors
/// while running.
pub async fn create_app(router: Router, server_config: &ServerConfig) -> io::Result<()> {
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;

    info!("Server starting on {}", listener.local_addr()?);
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        })?;

    Ok(())
}

/// Assembles the application router around a set of API routes.
///
/// Sets up:
/// - OpenAPI documentation (Swagger UI at `/swagger-ui`, RapiDoc at `/rapidoc`)
/// - API routes nested under `/api`
/// - Request tracing and response compression
/// - JSON 404 fallback
///
/// Domain routers apply their own state internally; this function only adds
/// cross-cutting concerns.
///
/// # Type Parameters
/// * `T` - A type implementing `utoipa::OpenApi` for API documentation
pub fn create_router<T>(apis: Router) -> Router
where
    T: OpenApi + 'static,
{
    use utoipa_rapidoc::RapiDoc;
    use utoipa_swagger_ui::SwaggerUi;

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .nest("/api", apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CompressionLayer::new())
}
