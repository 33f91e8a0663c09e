//! URL diagnostics: risk classification, redirect tracing and URL info.

use std::sync::Arc;

use crate::application::services::redirect_resolver::{RedirectResolver, ResolveError};
use crate::domain::classifier::PatternClassifier;
use crate::domain::entities::{RedirectChain, RedirectHop, Verdict};
use crate::domain::gateways::{MetadataProvider, PageMetadata};

/// Aggregated information about a target URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlInfo {
    pub metadata: PageMetadata,
    /// URL as submitted.
    pub url: String,
    /// Final destination after following redirects.
    pub effective_url: String,
    /// Redirect hops, without the terminal one.
    pub redirections: Vec<RedirectHop>,
    /// Verdict for the final destination.
    pub verdict: Verdict,
}

/// Combines the classifier, the redirect resolver and the metadata provider.
pub struct InspectionService {
    resolver: Arc<RedirectResolver>,
    classifier: Arc<PatternClassifier>,
    metadata: Arc<dyn MetadataProvider>,
}

impl InspectionService {
    pub fn new(
        resolver: Arc<RedirectResolver>,
        classifier: Arc<PatternClassifier>,
        metadata: Arc<dyn MetadataProvider>,
    ) -> Self {
        Self {
            resolver,
            classifier,
            metadata,
        }
    }

    /// Classifies the URL exactly as given. No network access.
    pub fn classify(&self, url: &str) -> Verdict {
        self.classifier.classify(url)
    }

    /// Name of the first rule matching `url`, if any.
    pub fn matching_rule(&self, url: &str) -> Option<String> {
        self.classifier
            .matching_rule(url)
            .map(|rule| rule.name().to_string())
    }

    /// Follows the redirect chain of `url`.
    ///
    /// # Errors
    ///
    /// Propagates [`ResolveError`] from the resolver.
    pub async fn trace_redirects(&self, url: &str) -> Result<RedirectChain, ResolveError> {
        self.resolver.resolve(url).await
    }

    /// Resolves `url`, then gathers metadata and a verdict for where it lands.
    ///
    /// `effective_url` is the terminal hop of the redirect chain.
    ///
    /// # Errors
    ///
    /// Propagates [`ResolveError`] from the resolver.
    pub async fn url_info(&self, url: &str) -> Result<UrlInfo, ResolveError> {
        let chain = self.resolver.resolve(url).await?;
        let effective_url = chain.final_url().to_string();

        let metadata = self.metadata.fetch_metadata(&effective_url).await;
        let verdict = self.classifier.classify(&effective_url);

        Ok(UrlInfo {
            metadata,
            url: url.to_string(),
            effective_url,
            redirections: chain.redirects().to_vec(),
            verdict,
        })
    }
}
