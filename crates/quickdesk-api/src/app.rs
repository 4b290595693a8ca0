//! Application assembly and server lifecycle.

use axum::Router;
use axum::http::StatusCode;
use axum::middleware as axum_middleware;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use quickdesk_core::config::AppConfig;
use quickdesk_core::error::AppError;
use quickdesk_database::Store;

use crate::middleware::{cors::build_cors_layer, logging::request_logging};
use crate::router::build_router;
use crate::state::AppState;

/// Builds the Axum application with the full middleware stack.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    let timeout = state.config.server.request_timeout();

    build_router(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(axum_middleware::from_fn(request_logging))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Serves the API until Ctrl+C.
pub async fn run_server(config: AppConfig, store: Store) -> Result<(), AppError> {
    let addr = config.server.bind_address();
    let app = build_app(AppState::new(config, store));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!(%addr, "QuickDesk server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    info!("QuickDesk server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            // Without a handler the server runs until the process is killed.
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    }
}
