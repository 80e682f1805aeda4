use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument, warn};

use super::{normalize_email, password::CredentialHasher, repo_types::Credentials, UserStore};
use crate::clock::{Clock, SystemClock};
use crate::db::storage_failure;
use crate::error::{HashError, StoreError};

/// Unique constraint guarding `users.email`; see the users migration.
const EMAIL_CONSTRAINT: &str = "users_uc_email";

/// Verified against when the email is unknown so both failure paths cost one
/// hash verification.
const DUMMY_PASSWORD: &str = "snippetbox-timing-equalizer";

/// PostgreSQL-backed [`UserStore`].
pub struct PgUserStore {
    db: PgPool,
    hasher: Arc<dyn CredentialHasher>,
    clock: Arc<dyn Clock>,
    dummy_hash: OnceCell<String>,
}

impl PgUserStore {
    pub fn new(db: PgPool, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self {
            db,
            hasher,
            clock: Arc::new(SystemClock),
            dummy_hash: OnceCell::new(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    async fn hash_blocking(&self, plain: &str) -> Result<String, HashError> {
        let hasher = Arc::clone(&self.hasher);
        let plain = plain.to_owned();
        tokio::task::spawn_blocking(move || hasher.hash(&plain)).await?
    }

    async fn verify_blocking(&self, plain: &str, digest: String) -> Result<bool, HashError> {
        let hasher = Arc::clone(&self.hasher);
        let plain = plain.to_owned();
        tokio::task::spawn_blocking(move || hasher.verify(&plain, &digest)).await?
    }

    async fn dummy_hash(&self) -> Result<String, HashError> {
        let digest = self
            .dummy_hash
            .get_or_try_init(|| self.hash_blocking(DUMMY_PASSWORD))
            .await?;
        Ok(digest.clone())
    }
}

fn is_duplicate_email(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::Database(db) => {
            db.is_unique_violation() && db.constraint() == Some(EMAIL_CONSTRAINT)
        }
        _ => false,
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    #[instrument(skip(self, password))]
    async fn insert(&self, name: &str, email: &str, password: &str) -> Result<(), StoreError> {
        let email = normalize_email(email);
        let hashed_password = self.hash_blocking(password).await?;

        let res = sqlx::query(
            r#"
            INSERT INTO users (name, email, hashed_password, created)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(name)
        .bind(&email)
        .bind(&hashed_password)
        .bind(self.clock.now())
        .execute(&self.db)
        .await;

        match res {
            Ok(_) => {
                info!(%email, "user created");
                Ok(())
            }
            Err(e) if is_duplicate_email(&e) => {
                warn!(%email, "email already registered");
                Err(StoreError::DuplicateEmail)
            }
            Err(e) => Err(storage_failure("insert user", e)),
        }
    }

    #[instrument(skip(self, password))]
    async fn authenticate(&self, email: &str, password: &str) -> Result<i64, StoreError> {
        let email = normalize_email(email);

        let creds = sqlx::query_as::<_, Credentials>(
            r#"
            SELECT id, hashed_password
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(&email)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| storage_failure("authenticate user", e))?;

        let Some(creds) = creds else {
            let digest = self.dummy_hash().await?;
            let _ = self.verify_blocking(password, digest).await?;
            warn!(%email, "login unknown email");
            return Err(StoreError::InvalidCredentials);
        };

        if !self.verify_blocking(password, creds.hashed_password).await? {
            warn!(%email, user_id = creds.id, "login invalid password");
            return Err(StoreError::InvalidCredentials);
        }

        debug!(user_id = creds.id, "user authenticated");
        Ok(creds.id)
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: i64) -> Result<bool, StoreError> {
        if id <= 0 {
            return Ok(false);
        }

        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.db)
            .await
            .map_err(|e| storage_failure("check user exists", e))
    }
}
