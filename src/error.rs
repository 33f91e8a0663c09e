//! HTTP-facing error type shared by all handlers.
//!
//! Domain errors ([`InsertError`], [`ResolveError`]) are converted into
//! [`AppError`] at the service boundary. The response body is a flat JSON
//! object with an `error` message so browser clients can display it directly:
//!
//! ```json
//! { "error": "Invalid URL format." }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::application::services::redirect_resolver::ResolveError;
use crate::domain::repositories::{InsertError, StorageError};

/// Message returned for every storage or otherwise unexpected failure.
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// Message returned when the shorten limiter rejects a request.
pub const RATE_LIMIT_MESSAGE: &str = "Too Many Requests: Rate limit exceeded.";

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(flatten)]
    details: Map<String, Value>,
}

/// Object details are merged into the body next to `error`; anything else
/// is dropped.
fn flatten_details(details: Value) -> Map<String, Value> {
    match details {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Application error surfaced to HTTP clients.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed or missing input. Never retried.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Unknown short id.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Rejected by the admission limiter. Caller may retry after backoff.
    #[error("{message}")]
    RateLimited { message: String, details: Value },

    /// Remote target failed while tracing its redirect chain.
    #[error("{message}")]
    Upstream { message: String, details: Value },

    /// Storage failure or exhausted identifier retries.
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn rate_limited() -> Self {
        Self::RateLimited {
            message: RATE_LIMIT_MESSAGE.to_string(),
            details: json!({}),
        }
    }

    pub fn upstream(message: impl Into<String>, details: Value) -> Self {
        Self::Upstream {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let (message, details) = match self {
            AppError::Validation { message, details }
            | AppError::NotFound { message, details }
            | AppError::RateLimited { message, details }
            | AppError::Upstream { message, details }
            | AppError::Internal { message, details } => (message, details),
        };

        (
            status,
            Json(ErrorBody {
                error: message,
                details: flatten_details(details),
            }),
        )
            .into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Validation failed".to_string());

        AppError::bad_request(message, json!({}))
    }
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        tracing::error!(error = %e, "storage failure");
        AppError::internal(SERVER_ERROR_MESSAGE, json!({}))
    }
}

impl From<InsertError> for AppError {
    fn from(e: InsertError) -> Self {
        match e {
            InsertError::Storage(e) => e.into(),
            InsertError::DuplicateId(short_id) => {
                tracing::error!(%short_id, "short id still colliding after retries");
                AppError::internal(SERVER_ERROR_MESSAGE, json!({}))
            }
        }
    }
}

impl From<ResolveError> for AppError {
    fn from(e: ResolveError) -> Self {
        match &e {
            ResolveError::InvalidUrl { .. } => AppError::bad_request(
                "Invalid URL format.",
                json!({ "url": e.failing_url(), "reason": e.to_string() }),
            ),
            _ => AppError::upstream(e.to_string(), json!({ "url": e.failing_url() })),
        }
    }
}
