//! Server startup and graceful shutdown

use crate::state::AppState;
use anyhow::Result;
use axum::Router;
use docsift_core::Config;
use std::sync::Arc;

/// Start the server with graceful shutdown
///
/// Once the listener stops, the engine handle is released and one final
/// sweep runs. In-flight requests are not drained beyond what axum does.
pub async fn start_server(config: &Config, state: Arc<AppState>, app: Router) -> Result<()> {
    let addr = format!("{}:{}", config.server_host(), config.server_port());
    tracing::info!(addr = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        max_file_mb = config.max_file_size() / 1024 / 1024,
        extensions = %config.allowed_extensions().join(","),
        docling_serve_url = %config.engine.docling_serve_url,
        max_concurrent_conversions = config.engine.max_concurrent_conversions,
        auth_enabled = config.api_key().is_some(),
        "Server ready and accepting connections"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    shutdown(&state).await;

    Ok(())
}

async fn shutdown(state: &AppState) {
    if state.converter.clear().await {
        tracing::info!("Conversion engine released");
    }

    let report = state.janitor.sweep().await;
    tracing::info!(deleted = report.deleted, "Shutdown sweep finished");

    docsift_infra::shutdown_telemetry().await;
}

/// Signal handler for graceful shutdown
///
/// Listens for Ctrl+C (SIGINT) and SIGTERM signals to initiate graceful shutdown.
///
/// # Panics
/// - Panics if Ctrl+C signal handler cannot be installed (unrecoverable system error)
/// - On Unix systems, panics if SIGTERM signal handler cannot be installed (unrecoverable system error)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal");
        },
    }

    tracing::info!("Shutting down gracefully...");
}
