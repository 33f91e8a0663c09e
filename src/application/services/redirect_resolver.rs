//! Redirect chain tracing.
//!
//! Follows `3xx` + `Location` responses one hop at a time through an injected
//! [`HttpProbe`]. Resolution is an explicit loop bounded by a hop limit, a
//! visited set, a per-hop timeout and a total timeout. Any failure discards
//! the partial chain and reports the URL that failed.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::domain::entities::{RedirectChain, RedirectHop};
use crate::domain::gateways::{HttpProbe, ProbeError};
use crate::utils::url_validation::parse_http_url;

/// Default maximum number of redirects followed.
pub const DEFAULT_MAX_HOPS: usize = 20;

/// Why a redirect chain could not be produced.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Request to {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: ProbeError,
    },

    #[error("Request to {url} timed out")]
    Timeout { url: String },

    #[error("Redirect chain starting at {url} timed out after {elapsed:?}")]
    TotalTimeout { url: String, elapsed: Duration },

    #[error("Too many redirects (more than {max_hops}) at {url}")]
    TooManyRedirects { url: String, max_hops: usize },

    #[error("Redirect cycle detected at {url}")]
    RedirectCycle { url: String },

    #[error("Invalid Location header '{location}' at {url}")]
    InvalidLocation { url: String, location: String },
}

impl ResolveError {
    /// The URL at which resolution failed.
    pub fn failing_url(&self) -> &str {
        match self {
            ResolveError::InvalidUrl { url, .. }
            | ResolveError::Fetch { url, .. }
            | ResolveError::Timeout { url }
            | ResolveError::TotalTimeout { url, .. }
            | ResolveError::TooManyRedirects { url, .. }
            | ResolveError::RedirectCycle { url }
            | ResolveError::InvalidLocation { url, .. } => url,
        }
    }

    fn outcome_label(&self) -> &'static str {
        match self {
            ResolveError::InvalidUrl { .. } => "invalid_url",
            ResolveError::Fetch { .. } => "fetch_error",
            ResolveError::Timeout { .. } | ResolveError::TotalTimeout { .. } => "timeout",
            ResolveError::TooManyRedirects { .. } => "too_many_redirects",
            ResolveError::RedirectCycle { .. } => "cycle",
            ResolveError::InvalidLocation { .. } => "invalid_location",
        }
    }
}

/// Bounds applied to a single resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverSettings {
    pub max_hops: usize,
    pub hop_timeout: Duration,
    pub total_timeout: Duration,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            max_hops: DEFAULT_MAX_HOPS,
            hop_timeout: Duration::from_secs(5),
            total_timeout: Duration::from_secs(20),
        }
    }
}

/// Follows redirects from a start URL to its final destination.
///
/// Holds no mutable state, so one instance can serve concurrent requests.
/// Dropping the returned future between hops abandons the resolution.
pub struct RedirectResolver {
    probe: Arc<dyn HttpProbe>,
    settings: ResolverSettings,
}

impl RedirectResolver {
    pub fn new(probe: Arc<dyn HttpProbe>, settings: ResolverSettings) -> Self {
        Self { probe, settings }
    }

    pub fn settings(&self) -> ResolverSettings {
        self.settings
    }

    /// Resolves the full redirect chain for `start_url`.
    ///
    /// The returned chain ends with a terminal hop (`from == to`). A URL that
    /// answers without redirecting yields a single terminal hop.
    ///
    /// # Errors
    ///
    /// See [`ResolveError`]. Partial chains are never returned.
    pub async fn resolve(&self, start_url: &str) -> Result<RedirectChain, ResolveError> {
        let start = parse_http_url(start_url).map_err(|e| ResolveError::InvalidUrl {
            url: start_url.to_string(),
            reason: e.to_string(),
        })?;

        let result = match tokio::time::timeout(self.settings.total_timeout, self.follow(start))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(ResolveError::TotalTimeout {
                url: start_url.to_string(),
                elapsed: self.settings.total_timeout,
            }),
        };

        let outcome = match &result {
            Ok(_) => "resolved",
            Err(e) => e.outcome_label(),
        };
        metrics::counter!("redirect_resolutions_total", "outcome" => outcome).increment(1);

        result
    }

    async fn follow(&self, start: Url) -> Result<RedirectChain, ResolveError> {
        let mut visited: HashSet<String> = HashSet::new();
        let mut hops: Vec<RedirectHop> = Vec::new();
        let mut current = start;

        loop {
            if !visited.insert(current.as_str().to_string()) {
                return Err(ResolveError::RedirectCycle {
                    url: current.to_string(),
                });
            }

            let response = match tokio::time::timeout(
                self.settings.hop_timeout,
                self.probe.fetch(&current),
            )
            .await
            {
                Ok(Ok(response)) => response,
                Ok(Err(ProbeError::Timeout)) | Err(_) => {
                    return Err(ResolveError::Timeout {
                        url: current.to_string(),
                    });
                }
                Ok(Err(source)) => {
                    return Err(ResolveError::Fetch {
                        url: current.to_string(),
                        source,
                    });
                }
            };

            let Some(location) = response.redirect_target() else {
                debug!(url = %current, status = response.status, "final destination reached");
                hops.push(RedirectHop::terminal(current.as_str()));
                return Ok(RedirectChain::from_hops(hops));
            };

            if hops.len() >= self.settings.max_hops {
                return Err(ResolveError::TooManyRedirects {
                    url: current.to_string(),
                    max_hops: self.settings.max_hops,
                });
            }

            let next = current
                .join(location)
                .ok()
                .filter(|next| matches!(next.scheme(), "http" | "https"))
                .ok_or_else(|| ResolveError::InvalidLocation {
                    url: current.to_string(),
                    location: location.to_string(),
                })?;

            debug!(from = %current, to = %next, status = response.status, "following redirect");
            hops.push(RedirectHop::new(current.as_str(), next.as_str()));
            current = next;
        }
    }
}
