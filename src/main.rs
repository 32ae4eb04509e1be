use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, router};
use dashboard_core::constants::{
    API_BASE_URL_ENV, API_KEY_ENV, DASHBOARD_ADDR_ENV, DEFAULT_DASHBOARD_ADDR, MODEL_ENV,
};
use dashboard_core::{DashboardConfig, DashboardService};

/// Main entry point for the disease dashboard server.
///
/// Resolves configuration once, then serves the dashboard page, the JSON
/// report endpoint and the Swagger UI.
///
/// # Environment Variables
/// - `OPENAI_API_KEY`: API key for the completion endpoint (required)
/// - `OPENAI_MODEL`: model name (default: "gpt-4o-mini")
/// - `OPENAI_BASE_URL`: API base URL (default: "https://api.openai.com/v1")
/// - `DASHBOARD_ADDR`: server address (default: "0.0.0.0:3000")
///
/// # Errors
/// Returns an error if the configuration is invalid, the address cannot be
/// bound, or the server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("dashboard_run=info".parse()?)
                .add_directive("dashboard_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = DashboardConfig::from_env_values(
        std::env::var(API_KEY_ENV).ok(),
        std::env::var(MODEL_ENV).ok(),
        std::env::var(API_BASE_URL_ENV).ok(),
    )?;
    tracing::info!("++ Using model {} at {}", config.model(), config.api_base_url());

    let addr =
        std::env::var(DASHBOARD_ADDR_ENV).unwrap_or_else(|_| DEFAULT_DASHBOARD_ADDR.into());
    tracing::info!("++ Starting disease dashboard on {}", addr);

    let service = DashboardService::from_config(config)?;
    let app = router(AppState::new(service));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
