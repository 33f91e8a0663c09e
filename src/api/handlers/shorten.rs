//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, Uri},
};

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::request_origin::{request_origin, short_url};

/// Creates a short URL for a long URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// Admission is decided by [`crate::api::middleware::rate_limit`] before this
/// handler runs.
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/some/long/path" }
/// ```
///
/// A leading `http://` is stored as `https://`.
///
/// # Response
///
/// ```json
/// { "shortUrl": "http://localhost:3000/lfls01" }
/// ```
///
/// # Errors
///
/// - **400 Bad Request**: URL does not match `http(s)://` followed by
///   non-whitespace characters, or the serving origin is unknown (no
///   `PUBLIC_BASE_URL`, no `Host` header and no URI authority)
/// - **500 Internal Server Error**: storage failure or exhausted id retries
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    // Must run before `shorten`: a failed lookup leaves nothing stored.
    let origin = request_origin(&headers, &uri, state.public_base_url.as_deref())?;

    let link = state.link_service.shorten(&payload.url).await?;

    Ok(Json(ShortenResponse {
        short_url: short_url(&origin, &link.short_id),
    }))
}
