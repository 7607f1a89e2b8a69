//! Folio Server - book fetch and analysis API

use anyhow::{Context, Result};
use folio_server::{config::ServerConfig, routes, state};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio_server=debug,folio_core=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env().context("Invalid server configuration")?;

    // Create application state
    let state = state::AppState::from_config(&config);

    // Build router
    let app = routes::create_router(state, &config.cors_origins);

    // Start server
    tracing::info!("Starting server on {}", config.bind);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    axum::serve(listener, app).await?;

    Ok(())
}
