//! Application builder: wires router, middleware and state into an Axum app.

use axum::Router;

use linkhub_core::config::AppConfig;
use linkhub_core::error::{AppError, ErrorKind};
use linkhub_database::DatabasePool;
use linkhub_database::migration::run_migrations;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Runs the LinkHub server with the given configuration and database pool.
pub async fn run_server(config: AppConfig, db: DatabasePool) -> Result<(), AppError> {
    tracing::info!("Starting LinkHub server...");

    if config.database.migrate_on_start {
        run_migrations(db.pool()).await?;
    }

    let addr = config.server.bind_address();
    let state = AppState::new(config, db.clone()).await?;
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        AppError::with_source(ErrorKind::Internal, format!("Failed to bind {addr}"), e)
    })?;

    tracing::info!(%addr, "LinkHub server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Server error", e))?;

    db.close().await;
    tracing::info!("LinkHub server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
