//! No-op metadata provider.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::gateways::{MetadataProvider, PageMetadata};

/// A metadata provider that knows nothing.
///
/// Page scraping is not part of this service; URL info responses carry empty
/// `title` and `description` until a real provider is plugged in.
pub struct NullMetadataProvider;

impl NullMetadataProvider {
    /// Creates a new NullMetadataProvider instance.
    pub fn new() -> Self {
        debug!("Using NullMetadataProvider (page metadata disabled)");
        Self
    }
}

impl Default for NullMetadataProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MetadataProvider for NullMetadataProvider {
    async fn fetch_metadata(&self, _url: &str) -> PageMetadata {
        PageMetadata::default()
    }
}
