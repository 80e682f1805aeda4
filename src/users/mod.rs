use async_trait::async_trait;

use crate::error::StoreError;

pub mod password;
mod repo;
mod repo_types;

pub use password::{Argon2Hasher, CredentialHasher};
pub use repo::PgUserStore;

/// Account creation and credential checks.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Hash `password` and store a new user.
    ///
    /// # Errors
    /// * `StoreError::DuplicateEmail` - the normalized email is taken
    /// * `StoreError::Storage` - hashing or database failure
    async fn insert(&self, name: &str, email: &str, password: &str) -> Result<(), StoreError>;

    /// Return the user's id when `password` matches the one stored for `email`.
    ///
    /// # Errors
    /// * `StoreError::InvalidCredentials` - unknown email or wrong password
    /// * `StoreError::Storage` - database failure or corrupt stored hash
    async fn authenticate(&self, email: &str, password: &str) -> Result<i64, StoreError>;

    /// Whether a user with `id` exists. Ids below 1 are never looked up.
    ///
    /// # Errors
    /// * `StoreError::Storage` - database failure
    async fn exists(&self, id: i64) -> Result<bool, StoreError>;
}

/// Emails are compared case-insensitively: trimmed and lowercased before
/// every insert and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
