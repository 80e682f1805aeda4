use std::num::NonZeroU32;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use time::Duration;
use tracing::{debug, instrument};

use super::{repo_types::Snippet, SnippetStore, LATEST_LIMIT};
use crate::clock::{Clock, SystemClock};
use crate::db::storage_failure;
use crate::error::StoreError;

/// PostgreSQL-backed [`SnippetStore`].
///
/// "Now" comes from the injected clock and is bound as a query parameter,
/// so the database's own clock never decides visibility.
pub struct PgSnippetStore {
    db: PgPool,
    clock: Arc<dyn Clock>,
}

impl PgSnippetStore {
    pub fn new(db: PgPool) -> Self {
        Self {
            db,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

/// Expiry would land past the largest representable timestamp.
#[derive(Debug, thiserror::Error)]
#[error("expiry of {0} days is out of range")]
struct ExpiryOutOfRange(u32);

#[async_trait]
impl SnippetStore for PgSnippetStore {
    #[instrument(skip(self, content))]
    async fn insert(
        &self,
        title: &str,
        content: &str,
        expires_in_days: NonZeroU32,
    ) -> Result<i64, StoreError> {
        let created = self.clock.now();
        let expires = created
            .checked_add(Duration::days(i64::from(expires_in_days.get())))
            .ok_or_else(|| {
                StoreError::storage(
                    "snippet expiry out of range",
                    ExpiryOutOfRange(expires_in_days.get()),
                )
            })?;

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO snippets (title, content, created, expires)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(created)
        .bind(expires)
        .fetch_one(&self.db)
        .await
        .map_err(|e| storage_failure("insert snippet", e))?;

        debug!(snippet_id = id, %expires, "snippet created");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: i64) -> Result<Snippet, StoreError> {
        if id < 1 {
            return Err(StoreError::NotFound);
        }

        sqlx::query_as::<_, Snippet>(
            r#"
            SELECT id, title, content, created, expires
            FROM snippets
            WHERE expires > $1 AND id = $2
            "#,
        )
        .bind(self.clock.now())
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| storage_failure("get snippet", e))?
        .ok_or(StoreError::NotFound)
    }

    #[instrument(skip(self))]
    async fn latest(&self) -> Result<Vec<Snippet>, StoreError> {
        let rows = sqlx::query_as::<_, Snippet>(
            r#"
            SELECT id, title, content, created, expires
            FROM snippets
            WHERE expires > $1
            ORDER BY id DESC
            LIMIT $2
            "#,
        )
        .bind(self.clock.now())
        .bind(LATEST_LIMIT)
        .fetch_all(&self.db)
        .await
        .map_err(|e| storage_failure("list latest snippets", e))?;

        debug!(count = rows.len(), "latest snippets loaded");
        Ok(rows)
    }
}
