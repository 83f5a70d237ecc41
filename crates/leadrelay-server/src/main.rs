//! Lead relay server entry point.
//!
//! Loads configuration, constructs the provider once, and serves the relay
//! with graceful shutdown. In-flight submissions finish before the process
//! exits; nothing is queued, so there is nothing else to drain.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use leadrelay_server::build_router;
use leadrelay_server::config::ServerConfig;
use leadrelay_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment.
    let config = ServerConfig::from_env().context("invalid relay configuration")?;

    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    info!(
        provider = config.provider.kind(),
        site_name = %config.site_name,
        timeout_secs = ?config.provider_timeout.map(|t| t.as_secs()),
        "lead relay starting"
    );

    let provider = config
        .build_provider()
        .context("failed to construct lead provider")?;
    let state = Arc::new(AppState::new(provider));

    let app = build_router(state, config.allowed_origin.clone());

    // Bind and serve.
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, "lead relay listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("lead relay stopped");
    Ok(())
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        if let Ok(mut sig) =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            sig.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received, stopping server");
}
