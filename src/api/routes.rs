//! API route configuration.

use crate::api::handlers::{
    check_malicious_handler, check_redirects_handler, qr_handler, shorten_handler,
    url_info_handler,
};
use crate::api::middleware::rate_limit;
use crate::state::AppState;
use axum::{Router, middleware, routing::post};

/// Routes admitted through the shorten token bucket.
///
/// # Endpoints
///
/// - `POST /shorten` - Create a short URL
pub fn limited_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route_layer(middleware::from_fn_with_state(state, rate_limit::layer))
}

/// Diagnostics routes, not rate limited.
///
/// # Endpoints
///
/// - `POST /check-redirects` - Trace a redirect chain
/// - `POST /check-malicious` - Classify a URL by pattern
/// - `POST /get-url-info`    - Resolve a URL and report where it lands
/// - `POST /qr`              - Render a URL as a 29x29 bitmap
pub fn inspection_routes() -> Router<AppState> {
    Router::new()
        .route("/check-redirects", post(check_redirects_handler))
        .route("/check-malicious", post(check_malicious_handler))
        .route("/get-url-info", post(url_info_handler))
        .route("/qr", post(qr_handler))
}
