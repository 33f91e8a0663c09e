//! Admission control middleware backed by the shared token bucket.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::{error::AppError, state::AppState};

/// Admits or rejects a request using [`AppState::shorten_limiter`].
///
/// The bucket is process-wide, not per client. Rejected requests never reach
/// the handler and receive `429 Too Many Requests` with body
/// `{"error": "Too Many Requests: Rate limit exceeded."}`.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::post, middleware};
/// use crate::api::middleware::rate_limit;
///
/// let limited = Router::new()
///     .route("/shorten", post(shorten_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), rate_limit::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !st.shorten_limiter.admit() {
        tracing::warn!(path = %req.uri().path(), "rate limit exceeded");
        metrics::counter!("shorten_requests_total", "outcome" => "rate_limited").increment(1);
        return Err(AppError::rate_limited());
    }

    Ok(next.run(req).await)
}
