//! HTML front-end: registration form, records report and CSV download.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod state;
pub mod views;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::Config;
use crate::db::RecordStore;
use crate::errors::{AppError, AppResult};

pub use router::build_app_router;
pub use state::AppState;

/// Bind `host:port` from the config and serve until Ctrl-C.
pub async fn serve(config: Config, store: Arc<dyn RecordStore>) -> AppResult<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::new(store, config);
    let app = build_app_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Server(format!("cannot bind {addr}: {e}")))?;
    tracing::info!(%addr, "Server listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| AppError::Server(e.to_string()))?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
