//! Redirect hops and chains produced by the redirect resolver.

use serde::Serialize;

/// One step of a redirect chain.
///
/// The terminal hop of a chain has `from == to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedirectHop {
    pub from: String,
    pub to: String,
}

impl RedirectHop {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Terminal hop: the URL answered without redirecting.
    pub fn terminal(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            from: url.clone(),
            to: url,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.from == self.to
    }
}

/// Ordered hops from a start URL to its final destination.
///
/// Always ends with exactly one terminal hop. Built per request, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RedirectChain {
    hops: Vec<RedirectHop>,
}

impl RedirectChain {
    pub(crate) fn from_hops(hops: Vec<RedirectHop>) -> Self {
        debug_assert!(hops.last().is_some_and(RedirectHop::is_terminal));
        Self { hops }
    }

    pub fn hops(&self) -> &[RedirectHop] {
        &self.hops
    }

    /// Hops that actually redirected, without the terminal one.
    pub fn redirects(&self) -> &[RedirectHop] {
        let end = self.hops.len().saturating_sub(1);
        &self.hops[..end]
    }

    pub fn redirect_count(&self) -> usize {
        self.redirects().len()
    }

    /// URL the chain settled on.
    pub fn final_url(&self) -> &str {
        self.hops.last().map(|hop| hop.to.as_str()).unwrap_or_default()
    }

    pub fn into_hops(self) -> Vec<RedirectHop> {
        self.hops
    }
}
