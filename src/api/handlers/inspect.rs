//! Handlers for the URL diagnostics endpoints.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::inspect::{
    CheckMaliciousResponse, CheckRedirectsResponse, CheckUrlRequest, UrlInfoResponse, UrlRequest,
};
use crate::error::AppError;
use crate::state::AppState;

const REDIRECTS_FOLLOWED_MESSAGE: &str = "Redirect chain followed successfully";

/// Follows the redirect chain of a URL.
///
/// # Endpoint
///
/// `POST /check-redirects`
///
/// # Request Body
///
/// ```json
/// { "urlToCheck": "https://bit.ly/xyz" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "message": "Redirect chain followed successfully",
///   "redirectChain": [
///     { "from": "https://bit.ly/xyz", "to": "https://example.com/" },
///     { "from": "https://example.com/", "to": "https://example.com/" }
///   ]
/// }
/// ```
///
/// The last entry is the terminal hop, with `from` equal to `to`.
///
/// # Errors
///
/// - **400 Bad Request**: `urlToCheck` missing, empty, or not an absolute
///   http(s) URL
/// - **502 Bad Gateway**: a hop failed, timed out, looped, or the hop limit
///   was reached; the body carries the failing `url`
pub async fn check_redirects_handler(
    State(state): State<AppState>,
    Json(payload): Json<CheckUrlRequest>,
) -> Result<Json<CheckRedirectsResponse>, AppError> {
    payload.validate()?;

    let chain = state
        .inspection_service
        .trace_redirects(&payload.url_to_check)
        .await?;

    Ok(Json(CheckRedirectsResponse {
        message: REDIRECTS_FOLLOWED_MESSAGE.to_string(),
        redirect_chain: chain.into_hops(),
    }))
}

/// Classifies a URL against the suspicious-pattern rules.
///
/// # Endpoint
///
/// `POST /check-malicious`
///
/// The input is classified as given, without normalization, so any plain
/// `http://` URL is reported as suspicious. No network access.
pub async fn check_malicious_handler(
    State(state): State<AppState>,
    Json(payload): Json<CheckUrlRequest>,
) -> Result<Json<CheckMaliciousResponse>, AppError> {
    payload.validate()?;

    let url = payload.url_to_check;
    let verdict = state.inspection_service.classify(&url);
    let matched_rule = state.inspection_service.matching_rule(&url);

    Ok(Json(CheckMaliciousResponse {
        message: verdict.message().to_string(),
        verdict,
        matched_rule,
    }))
}

/// Resolves a URL and reports where it lands.
///
/// # Endpoint
///
/// `POST /get-url-info`
///
/// `effectiveUrl` is the terminal hop of the redirect chain and
/// `safeBrowsing` is the verdict for it.
pub async fn url_info_handler(
    State(state): State<AppState>,
    Json(payload): Json<UrlRequest>,
) -> Result<Json<UrlInfoResponse>, AppError> {
    payload.validate()?;

    let info = state.inspection_service.url_info(&payload.url).await?;

    Ok(Json(info.into()))
}
