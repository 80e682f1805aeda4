use std::num::NonZeroU32;

use async_trait::async_trait;

use crate::error::StoreError;

mod repo;
mod repo_types;

pub use repo::PgSnippetStore;
pub use repo_types::Snippet;

/// Maximum number of snippets returned by [`SnippetStore::latest`].
pub const LATEST_LIMIT: i64 = 10;

/// Durable storage and expiry-aware retrieval of snippets.
#[async_trait]
pub trait SnippetStore: Send + Sync {
    /// Store a snippet that stays visible for `expires_in_days` days and
    /// return its id.
    async fn insert(
        &self,
        title: &str,
        content: &str,
        expires_in_days: NonZeroU32,
    ) -> Result<i64, StoreError>;

    /// Fetch an unexpired snippet. Missing and expired ids both yield
    /// `StoreError::NotFound`.
    async fn get(&self, id: i64) -> Result<Snippet, StoreError>;

    /// Up to [`LATEST_LIMIT`] unexpired snippets, newest id first.
    async fn latest(&self) -> Result<Vec<Snippet>, StoreError>;
}
