//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short id to its original URL.
///
/// # Endpoint
///
/// `GET /{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the short id doesn't exist.
/// Returns 500 Internal Server Error if the store fails.
pub async fn redirect_handler(
    Path(short_id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let link = state.link_service.resolve(&short_id).await?;

    debug!(%short_id, target = %link.original_url, "redirecting");

    Ok(Redirect::temporary(&link.original_url))
}
