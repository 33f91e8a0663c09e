//! Short link creation and lookup service.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio_retry::RetryIf;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::{InsertError, LinkRepository, StorageError};
use crate::error::AppError;
use crate::utils::code_generator::IdentifierAllocator;
use crate::utils::url_validation::normalize_shorten_url;

/// Default number of insert attempts before giving up on id collisions.
pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

/// Service for creating and resolving short links.
///
/// Admission control happens before this service is reached (see
/// [`crate::api::middleware::rate_limit`]); the service itself validates the
/// URL, allocates an id and persists the pair.
pub struct LinkService<L: LinkRepository + ?Sized> {
    repository: Arc<L>,
    allocator: Arc<IdentifierAllocator>,
    max_attempts: usize,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    pub fn new(repository: Arc<L>, allocator: Arc<IdentifierAllocator>) -> Self {
        Self {
            repository,
            allocator,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Overrides the number of insert attempts (at least one).
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Validates, normalizes and stores `raw_url` under a fresh short id.
    ///
    /// # Id collisions
    ///
    /// The store is the only uniqueness guard. On
    /// [`InsertError::DuplicateId`] a new id is allocated and the insert is
    /// retried, up to `max_attempts` inserts in total.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL does not match the
    /// accepted grammar.
    /// Returns [`AppError::Internal`] on storage failures or when every
    /// attempt collided.
    pub async fn shorten(&self, raw_url: &str) -> Result<ShortLink, AppError> {
        let original_url = normalize_shorten_url(raw_url)
            .map_err(|e| AppError::bad_request(e.to_string(), json!({})))?;

        let retries = std::iter::repeat(Duration::ZERO).take(self.max_attempts - 1);

        let result = RetryIf::start(
            retries,
            || {
                let new_link = NewShortLink::new(self.allocator.allocate(), original_url.clone());
                async move { self.repository.insert(new_link).await }
            },
            |e: &InsertError| match e {
                InsertError::DuplicateId(short_id) => {
                    tracing::debug!(%short_id, "short id collision, retrying");
                    true
                }
                InsertError::Storage(_) => false,
            },
        )
        .await;

        match result {
            Ok(link) => {
                metrics::counter!("shorten_requests_total", "outcome" => "created").increment(1);
                tracing::info!(short_id = %link.short_id, "short link created");
                Ok(link)
            }
            Err(e) => {
                metrics::counter!("shorten_requests_total", "outcome" => "failed").increment(1);
                Err(e.into())
            }
        }
    }

    /// Looks up the link for a short id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the id is unknown.
    /// Returns [`AppError::Internal`] on storage failures.
    pub async fn resolve(&self, short_id: &str) -> Result<ShortLink, AppError> {
        self.repository
            .find_by_short_id(short_id)
            .await?
            .ok_or_else(|| AppError::not_found("Not found", json!({ "short_id": short_id })))
    }

    /// Checks that the backing store answers.
    pub async fn health_check(&self) -> Result<(), StorageError> {
        self.repository.health_check().await
    }
}
