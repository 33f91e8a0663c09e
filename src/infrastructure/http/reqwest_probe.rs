//! `reqwest`-backed [`HttpProbe`].

use async_trait::async_trait;
use reqwest::{Client, header, redirect::Policy};
use std::time::Duration;
use url::Url;

use crate::domain::gateways::{HttpProbe, ProbeError, ProbeResponse};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Issues single GET requests with automatic redirect following disabled.
///
/// The resolver walks the chain itself, so the client must hand back every
/// `3xx` untouched. Only headers are read; the body is dropped with the
/// response, which releases the connection.
#[derive(Debug, Clone)]
pub struct ReqwestProbe {
    client: Client,
}

impl ReqwestProbe {
    /// Builds a probe whose requests time out after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`reqwest::Error`] if the TLS backend cannot be initialized.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .redirect(Policy::none())
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpProbe for ReqwestProbe {
    async fn fetch(&self, url: &Url) -> Result<ProbeResponse, ProbeError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProbeError::Timeout
                } else {
                    ProbeError::Transport(e.to_string())
                }
            })?;

        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Ok(ProbeResponse::new(response.status().as_u16(), location))
    }
}
