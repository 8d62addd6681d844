// src/api/http/router.rs
// Route table, middleware and the serve loop

use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers::{
    convert_handler, fallback_handler, index_handler, preflight_handler, status_handler,
};
use crate::config::ServerConfig;
use crate::state::AppState;

/// Max request body size for /convert
pub const CONVERT_MAX_BODY_BYTES: usize = 64 * 1024;

/// Create the router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(index_handler).options(preflight_handler))
        .route("/index.html", get(index_handler).options(preflight_handler))
        .route(
            "/convert",
            post(convert_handler)
                .options(preflight_handler)
                .layer(DefaultBodyLimit::max(CONVERT_MAX_BODY_BYTES)),
        )
        .route("/api/status", get(status_handler))
        .fallback(fallback_handler)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until Ctrl+C
pub async fn run(state: AppState, config: &ServerConfig) -> Result<()> {
    let app = create_router(state);
    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    info!("Server running at: http://{}", listener.local_addr()?);
    info!("Press Ctrl+C to stop the server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
