//! Process-local implementation of link repository.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tokio::sync::RwLock;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::{InsertError, LinkRepository, StorageError};

/// In-memory mapping store.
///
/// Used when no database is configured and in integration tests. Data is lost
/// on restart. The existence check and the insert run under one write lock.
#[derive(Debug, Default)]
pub struct InMemoryLinkRepository {
    links: RwLock<HashMap<String, ShortLink>>,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored links.
    pub async fn len(&self) -> usize {
        self.links.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.links.read().await.is_empty()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, InsertError> {
        let mut links = self.links.write().await;

        match links.entry(new_link.short_id) {
            Entry::Occupied(entry) => Err(InsertError::DuplicateId(entry.key().clone())),
            Entry::Vacant(entry) => {
                let link = ShortLink::new(entry.key().clone(), new_link.original_url, Utc::now());
                entry.insert(link.clone());
                Ok(link)
            }
        }
    }

    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<ShortLink>, StorageError> {
        Ok(self.links.read().await.get(short_id).cloned())
    }

    async fn health_check(&self) -> Result<(), StorageError> {
        Ok(())
    }
}
