//! Data-access layer for snippetbox: expiring text snippets and user accounts
//! stored in PostgreSQL.

pub mod clock;
pub mod config;
pub mod db;
pub mod error;
pub mod snippets;
pub mod state;
pub mod users;
pub mod validation;

pub use clock::{Clock, SystemClock};
pub use error::{HashError, StoreError};
pub use snippets::{PgSnippetStore, Snippet, SnippetStore, LATEST_LIMIT};
pub use state::AppState;
pub use users::{normalize_email, Argon2Hasher, CredentialHasher, PgUserStore, UserStore};
