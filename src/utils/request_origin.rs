//! Serving origin detection for building short URLs.

use crate::AppError;
use axum::http::{HeaderMap, Uri, header};
use serde_json::json;

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Returns the origin (`scheme://host[:port]`) short URLs should point at.
///
/// A configured base URL always wins. Otherwise the host is taken from the
/// `Host` header, or from the request URI authority when the header is
/// absent (HTTP/2 sends `:authority` instead). The scheme comes from
/// `X-Forwarded-Proto` when present, then from the URI, and is `http`
/// otherwise. The port is kept since the short URL must reach this very
/// listener.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if no base URL is configured and neither
/// a valid `Host` header nor a URI authority is available.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "localhost:3000".parse().unwrap());
///
/// let origin = request_origin(&headers, &Uri::default(), None).unwrap();
/// assert_eq!(origin, "http://localhost:3000");
/// ```
pub fn request_origin(
    headers: &HeaderMap,
    uri: &Uri,
    base_url: Option<&str>,
) -> Result<String, AppError> {
    if let Some(base) = base_url {
        return Ok(base.trim_end_matches('/').to_string());
    }

    let host = match headers.get(header::HOST) {
        Some(value) => value
            .to_str()
            .map_err(|_| AppError::bad_request("Invalid Host header", json!({})))?,
        None => uri
            .authority()
            .map(|authority| authority.as_str())
            .ok_or_else(|| AppError::bad_request("Missing Host header", json!({})))?,
    };

    let scheme = headers
        .get(FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(',').next().unwrap_or(v).trim())
        .or_else(|| uri.scheme_str())
        .filter(|v| matches!(*v, "http" | "https"))
        .unwrap_or("http");

    Ok(format!("{scheme}://{host}"))
}

/// Joins an origin and a short id into the public short URL.
pub fn short_url(origin: &str, short_id: &str) -> String {
    format!("{}/{}", origin.trim_end_matches('/'), short_id)
}
