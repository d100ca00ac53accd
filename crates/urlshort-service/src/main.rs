//! urlshort service - HTTP API for short links
//!
//! This is the main entry point for the urlshort service.

use std::net::SocketAddr;
use std::sync::Arc;

use urlshort_service::{create_router, init_logging, AppState, ServiceConfig};
use urlshort_store::{SqliteStore, Store};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration from environment
    let config = ServiceConfig::from_env();

    // Held until the end of main so buffered log lines are flushed
    let _log_guards = init_logging(&config)?;

    tracing::info!("Starting urlshort service");
    tracing::info!(
        listen_addr = %config.listen_addr,
        db_path = %config.db_path,
        public_base_url = %config.public_base_url,
        log_dir = ?config.log_dir,
        "Service configuration loaded"
    );

    // Initialize SQLite store
    tracing::info!(path = %config.db_path, "Opening SQLite store");
    let store = Arc::new(SqliteStore::open(&config.db_path).await?);
    store.create_schema().await?;
    tracing::info!("Tables ensured");

    // Build app state
    let state = AppState::new(store.clone(), config.clone());

    // Create the router
    let app = create_router(state);

    // Start HTTP server
    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    store.close().await;
    tracing::info!("Shutdown complete");

    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
