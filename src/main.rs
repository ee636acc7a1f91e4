use healthai_core::CoreConfig;
use healthai_core::constants::{DEFAULT_REST_ADDR, ENV_REST_ADDR};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_shared::HealthService;

/// Main entry point for the HealthAI application
///
/// Resolves configuration, loads the catalogue and serves the REST API until Ctrl-C.
///
/// # Environment Variables
/// - `HEALTHAI_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `HEALTHAI_CATALOGUE`: Catalogue YAML overriding the embedded one
/// - `HEALTHAI_DETECTION`: `substring` (default) or `word`
/// - `HEALTHAI_ANALYSIS_DELAY_MS`, `HEALTHAI_TREATMENT_DELAY_MS`, `HEALTHAI_CHAT_DELAY_MS`:
///   simulated latencies, `0` disables them
///
/// # Returns
/// * `Ok(())` - If the server starts and shuts down cleanly
/// * `Err(anyhow::Error)` - If configuration, catalogue loading or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("healthai=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("catalogue=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr: SocketAddr = std::env::var(ENV_REST_ADDR)
        .unwrap_or_else(|_| DEFAULT_REST_ADDR.into())
        .parse()?;

    let cfg = CoreConfig::from_lookup(|key| std::env::var(key).ok())?;
    let catalogue = cfg.load_catalogue()?;

    tracing::info!(
        "++ {} ({} conditions, detection: {})",
        HealthService::check_health().message,
        catalogue.conditions().len(),
        cfg.detection()
    );
    tracing::info!("++ Starting HealthAI REST on {}", rest_addr);

    let app = api_rest::router(api_rest::AppState::new(cfg, catalogue));
    let listener = tokio::net::TcpListener::bind(rest_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("-- Shutting down");
        })
        .await?;

    Ok(())
}
