//! HTTP server.
//!
//! Provides three endpoints:
//! - `GET /` - service status and calculation facility availability
//! - `GET /panchang` - Panchang for a date and place
//! - `POST /api/panchang` - deprecated placeholder returning fixed values

mod handlers;
mod types;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use handlers::{panchang_handler, root_handler, stub_handler};
pub use types::{AppState, ErrorBody, RootResponse, ServerError, StubRequest, StubResponse};

/// Builds the application router.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/panchang", get(panchang_handler))
        .route("/api/panchang", post(stub_handler))
        .layer(cors)
        .with_state(state)
}

/// Binds `address` and serves `app` until Ctrl-C.
pub async fn start_server(address: &str, app: Router) -> Result<(), anyhow::Error> {
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind server to {}: {}", address, e))?;

    log::info!("Panchang service listening on http://{}/", address);
    log::info!("  - Status: http://{}/", address);
    log::info!("  - Panchang: http://{}/panchang", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    log::info!("Panchang service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
