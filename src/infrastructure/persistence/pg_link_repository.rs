//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::{InsertError, LinkRepository, StorageError};

const CREATE_URLS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS urls (
    id           BIGSERIAL PRIMARY KEY,
    original_url TEXT        NOT NULL,
    short_id     TEXT        NOT NULL UNIQUE,
    created_at   TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

#[derive(sqlx::FromRow)]
struct ShortLinkRow {
    short_id: String,
    original_url: String,
    created_at: DateTime<Utc>,
}

impl From<ShortLinkRow> for ShortLink {
    fn from(row: ShortLinkRow) -> Self {
        ShortLink::new(row.short_id, row.original_url, row.created_at)
    }
}

/// PostgreSQL repository for the `urls` table.
///
/// Uniqueness of `short_id` is enforced by a unique constraint and the insert
/// is a single conditional statement, so concurrent inserts of the same id
/// cannot both succeed.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Creates the `urls` table if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the statement fails.
    pub async fn ensure_schema(&self) -> Result<(), StorageError> {
        sqlx::query(CREATE_URLS_TABLE)
            .execute(self.pool.as_ref())
            .await?;
        Ok(())
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, InsertError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            INSERT INTO urls (original_url, short_id)
            VALUES ($1, $2)
            ON CONFLICT (short_id) DO NOTHING
            RETURNING short_id, original_url, created_at
            "#,
        )
        .bind(&new_link.original_url)
        .bind(&new_link.short_id)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(StorageError::from)?;

        row.map(ShortLink::from)
            .ok_or(InsertError::DuplicateId(new_link.short_id))
    }

    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<ShortLink>, StorageError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            SELECT short_id, original_url, created_at
            FROM urls
            WHERE short_id = $1
            "#,
        )
        .bind(short_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ShortLink::from))
    }

    async fn health_check(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;
        Ok(())
    }
}
