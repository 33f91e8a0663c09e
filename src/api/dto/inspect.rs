//! DTOs for the URL diagnostics endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::UrlInfo;
use crate::domain::entities::{RedirectHop, Verdict};

/// Body of `POST /check-redirects` and `POST /check-malicious`.
#[derive(Debug, Deserialize, Validate)]
pub struct CheckUrlRequest {
    #[serde(default, rename = "urlToCheck")]
    #[validate(length(min = 1, message = "URL is required"))]
    pub url_to_check: String,
}

#[derive(Debug, Serialize)]
pub struct CheckRedirectsResponse {
    pub message: String,
    #[serde(rename = "redirectChain")]
    pub redirect_chain: Vec<RedirectHop>,
}

/// Body shared by `POST /get-url-info` and `POST /qr`.
#[derive(Debug, Deserialize, Validate)]
pub struct UrlRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "URL is required"))]
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct CheckMaliciousResponse {
    pub message: String,
    pub verdict: Verdict,
    /// Name of the rule that flagged the URL.
    #[serde(rename = "matchedRule", skip_serializing_if = "Option::is_none")]
    pub matched_rule: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UrlInfoResponse {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: String,
    #[serde(rename = "effectiveUrl")]
    pub effective_url: String,
    pub redirections: Vec<RedirectHop>,
    #[serde(rename = "safeBrowsing")]
    pub safe_browsing: Verdict,
}

impl From<UrlInfo> for UrlInfoResponse {
    fn from(info: UrlInfo) -> Self {
        Self {
            title: info.metadata.title,
            description: info.metadata.description,
            url: info.url,
            effective_url: info.effective_url,
            redirections: info.redirections,
            safe_browsing: info.verdict,
        }
    }
}
