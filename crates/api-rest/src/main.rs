//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! Useful for development when you only want the HTTP surface (with OpenAPI/Swagger UI). The
//! workspace's main `healthai-run` binary serves the same router.

use healthai_core::constants::{DEFAULT_REST_ADDR, ENV_REST_ADDR};
use healthai_core::CoreConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the HealthAI REST API server
///
/// # Environment Variables
/// - `HEALTHAI_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `HEALTHAI_CATALOGUE`, `HEALTHAI_DETECTION`, `HEALTHAI_*_DELAY_MS`: see `CoreConfig`
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration or catalogue is invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var(ENV_REST_ADDR).unwrap_or_else(|_| DEFAULT_REST_ADDR.into());

    let cfg = CoreConfig::from_lookup(|key| std::env::var(key).ok())?;
    let catalogue = cfg.load_catalogue()?;

    tracing::info!("-- Starting HealthAI REST API on {}", addr);

    let app = api_rest::router(api_rest::AppState::new(cfg, catalogue));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
