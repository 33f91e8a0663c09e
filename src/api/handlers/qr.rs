//! Handler for bitmap rendering.

use axum::Json;
use validator::Validate;

use crate::api::dto::inspect::UrlRequest;
use crate::api::dto::qr::QrResponse;
use crate::domain::qr_matrix::synthesize;
use crate::error::AppError;

/// Renders the URL's bytes into a 29x29 bitmap.
///
/// # Endpoint
///
/// `POST /qr`
///
/// The bitmap has three finder squares but no error correction or masking;
/// it is not scannable by standard QR readers. Bits past the data capacity
/// are dropped.
pub async fn qr_handler(Json(payload): Json<UrlRequest>) -> Result<Json<QrResponse>, AppError> {
    payload.validate()?;

    Ok(Json(synthesize(&payload.url).into()))
}
