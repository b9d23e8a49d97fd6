use axum_helpers::server::{create_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to MongoDB at {}", config.mongodb.url());

    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;
    let db = mongo_client.database(config.mongodb.database());

    info!(
        "Connected to MongoDB database: {}",
        config.mongodb.database()
    );

    api::users::init_indexes(&db).await?;

    let state = AppState {
        config,
        mongo_client,
        db,
    };

    let api_routes = api::routes(&state);

    let app = create_router::<openapi::ApiDoc>(api_routes)
        .merge(health_router(state.config.app.clone()));

    create_app(app, &state.config.server)
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("User API shutdown complete");
    Ok(())
}
