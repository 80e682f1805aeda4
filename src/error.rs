//! Error kinds returned by the stores.

use std::error::Error as StdError;
use thiserror::Error;

/// Boxed error for wrapping driver or hasher failures.
pub type BoxedError = Box<dyn StdError + Send + Sync>;

/// Failure of a store operation.
///
/// The `Display` text never includes the database's own message, so it is safe
/// to show to an end user. The underlying error stays reachable through
/// `source()` for logging.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No visible snippet with the requested id (missing or expired).
    #[error("no matching record found")]
    NotFound,

    /// A user with the same (normalized) email already exists.
    #[error("duplicate email")]
    DuplicateEmail,

    /// Unknown email or wrong password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Connectivity, transaction, constraint or data failure.
    #[error("storage error: {context}")]
    Storage {
        context: &'static str,
        #[source]
        source: BoxedError,
    },
}

impl StoreError {
    /// Create a storage error with source
    pub fn storage(context: &'static str, source: impl StdError + Send + Sync + 'static) -> Self {
        Self::Storage {
            context,
            source: Box::new(source),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

/// Failure of the password hashing capability.
#[derive(Debug, Error)]
pub enum HashError {
    #[error("password hashing failed: {0}")]
    Hash(String),

    #[error("stored password hash is malformed: {0}")]
    MalformedDigest(String),

    #[error("hashing task did not complete: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl From<HashError> for StoreError {
    fn from(e: HashError) -> Self {
        StoreError::storage("credential hashing failed", e)
    }
}
