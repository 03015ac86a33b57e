//! REST API layer built on Axum.
//!
//! Routes:
//! - `GET /health`
//! - `POST /index` runs ingestion over the screenshots directory
//! - `POST /search` runs a hybrid query
//! - `GET /screenshots/{name}` serves the indexed image files

/// API error types mapped to HTTP status codes.
pub mod errors;
/// HTTP request handlers and application state.
pub mod handlers;
/// Request and response data transfer objects.
pub mod models;

use std::net::SocketAddr;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, post};
use log::{info, warn};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::error::{Result, ScreenrackError};

pub use handlers::AppState;

/// Builds the Axum router. `cors_origin`, when set, is the single origin
/// allowed to call the API from a browser.
pub fn create_router(state: AppState, cors_origin: Option<&str>) -> Result<Router> {
    let screenshots = ServeDir::new(&state.screenshots_dir);

    let mut router = Router::new()
        .route("/health", get(handlers::health))
        .route("/index", post(handlers::index))
        .route("/search", post(handlers::search))
        .nest_service("/screenshots", screenshots)
        .with_state(state);

    if let Some(origin) = cors_origin {
        let origin = HeaderValue::from_str(origin)
            .map_err(|e| ScreenrackError::config(format!("invalid CORS origin {origin:?}: {e}")))?;
        router = router.layer(
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE]),
        );
    }

    Ok(router)
}

/// Serve `router` on `addr` until Ctrl-C.
pub async fn serve(router: Router, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutting down"),
        Err(e) => {
            warn!("Cannot listen for Ctrl-C, serving until killed: {e}");
            std::future::pending::<()>().await;
        }
    }
}
