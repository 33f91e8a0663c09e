//! Repository trait for short link data access.

use crate::domain::entities::{NewShortLink, ShortLink};
use async_trait::async_trait;

/// Connectivity or durability fault in the backing store.
///
/// Fatal for the current request. Distinct from "not found", which is a
/// normal lookup outcome.
#[derive(Debug, thiserror::Error)]
#[error("storage failure: {0}")]
pub struct StorageError(pub String);

impl From<sqlx::Error> for StorageError {
    fn from(e: sqlx::Error) -> Self {
        StorageError(e.to_string())
    }
}

/// Errors returned by [`LinkRepository::insert`].
#[derive(Debug, thiserror::Error)]
pub enum InsertError {
    /// The short id is already mapped. The stored record is left untouched.
    #[error("short id '{0}' already exists")]
    DuplicateId(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Repository interface for the short id mapping store.
///
/// Implementations must be safe under concurrent callers. `insert` is the
/// sole uniqueness guard in the system and must be an atomic conditional
/// insert, never a read-then-write.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryLinkRepository`] - Process-local map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Stores a new mapping.
    ///
    /// # Errors
    ///
    /// Returns [`InsertError::DuplicateId`] if the short id already exists.
    /// Returns [`InsertError::Storage`] on backend failures.
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, InsertError>;

    /// Point read by short id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ShortLink))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] on backend failures.
    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<ShortLink>, StorageError>;

    /// Checks whether the backend is reachable.
    async fn health_check(&self) -> Result<(), StorageError>;
}
