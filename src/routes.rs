//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorten`          - Create a short URL (token bucket admission)
//! - `POST /check-redirects`  - Redirect chain tracing
//! - `POST /check-malicious`  - Pattern classification
//! - `POST /get-url-info`     - Final destination and verdict
//! - `POST /qr`               - Bitmap rendering
//! - `GET  /health`           - Health check
//! - `GET  /{id}`             - Short link redirect
//! - everything else          - Static files from the configured directory
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Single process-wide token bucket on `/shorten`
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use std::path::Path;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `static_dir` - directory whose `index.html` is served at `/`
pub fn app_router(state: AppState, static_dir: impl AsRef<Path>) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, static_dir))
}

/// Routes and layers without path normalization.
pub fn router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .merge(api::routes::limited_routes(state.clone()))
        .merge(api::routes::inspection_routes())
        .route("/health", get(health_handler))
        .route("/{id}", get(redirect_handler))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
        .layer(tracing::layer())
}
