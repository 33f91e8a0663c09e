//! Short link entity representing a short id to URL mapping.

use chrono::{DateTime, Utc};

/// A stored mapping from a short id to its original URL.
///
/// Records are created once and never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub short_id: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
}

impl ShortLink {
    /// Creates a new ShortLink instance.
    pub fn new(short_id: String, original_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            short_id,
            original_url,
            created_at,
        }
    }
}

/// Input data for inserting a new mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortLink {
    pub short_id: String,
    pub original_url: String,
}

impl NewShortLink {
    pub fn new(short_id: impl Into<String>, original_url: impl Into<String>) -> Self {
        Self {
            short_id: short_id.into(),
            original_url: original_url.into(),
        }
    }
}
