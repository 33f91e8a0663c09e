//! Page metadata lookup used when composing URL info.

use async_trait::async_trait;
use serde::Serialize;

/// Title and description of a page, when known.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Supplies page metadata for a resolved URL.
///
/// Implementations must not fail the request: unknown metadata is reported
/// as empty fields.
///
/// # Implementations
///
/// - [`crate::infrastructure::metadata::NullMetadataProvider`] - Always empty
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    async fn fetch_metadata(&self, url: &str) -> PageMetadata;
}
