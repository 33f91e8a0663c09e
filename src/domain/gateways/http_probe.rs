//! HTTP probing capability used by the redirect resolver.

use async_trait::async_trait;
use url::Url;

/// Status line and `Location` header of a single response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    pub status: u16,
    pub location: Option<String>,
}

impl ProbeResponse {
    pub fn new(status: u16, location: Option<String>) -> Self {
        Self { status, location }
    }

    /// Plain, non-redirecting response.
    pub fn ok() -> Self {
        Self::new(200, None)
    }

    pub fn redirect(status: u16, location: impl Into<String>) -> Self {
        Self::new(status, Some(location.into()))
    }

    /// Raw `Location` value when the response is a 3xx that names a target.
    pub fn redirect_target(&self) -> Option<&str> {
        if (300..400).contains(&self.status) {
            self.location.as_deref()
        } else {
            None
        }
    }
}

/// Transport-level failure for a single probe.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProbeError {
    #[error("request timed out")]
    Timeout,

    #[error("request error: {0}")]
    Transport(String),
}

/// Issues one request without following redirects.
///
/// # Implementations
///
/// - [`crate::infrastructure::http::ReqwestProbe`] - `reqwest` client with redirects disabled
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpProbe: Send + Sync {
    /// Fetches `url` and reports its status and `Location` header.
    ///
    /// The response body is never read.
    async fn fetch(&self, url: &Url) -> Result<ProbeResponse, ProbeError>;
}
