//! # Granite Bank Server
//!
//! Main entry point for the Granite Bank demo server.

#![forbid(unsafe_code)]
#![deny(warnings)]

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use granite_server::config::ServerConfig;
use granite_server::router::create_router;
use granite_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    let addr = format!("{}:{}", config.host, config.port);

    tracing::info!(
        issuer = %config.revocation_issuer,
        jwks_url = %config.jwks_url,
        "Granite Bank starting"
    );

    let state = AppState::from_config(config);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
