use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::{prelude::*, EnvFilter};

/// Install color-eyre for colored error reports.
///
/// Call this early in main(), before any fallible operations. Safe to call
/// multiple times; later installs are ignored.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Initialize tracing with environment-aware output.
///
/// - Production (`APP_ENV=production`): JSON logs for aggregation, module
///   targets hidden.
/// - Development (default): pretty-printed human-readable logs.
///
/// Both modes include `tracing_error::ErrorLayer` so error reports carry the
/// span trace of instrumented code. `RUST_LOG` overrides the default filter
/// ("info" in production, "debug" in development).
///
/// Safe to call more than once: if a subscriber is already set, the call is
/// a no-op (common in tests).
pub fn init_tracing(environment: &Environment) {
    let is_production = environment.is_production();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if is_production {
            EnvFilter::new("info")
        } else {
            EnvFilter::new("debug")
        }
    });

    let result = if is_production {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_file(false)
                    .with_line_number(false)
                    .pretty(),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    };

    match result {
        Ok(_) => info!("Tracing initialized. Environment: {:?}", environment),
        Err(_) => debug!("Tracing already initialized, skipping"),
    }
}
