use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::db;
use crate::snippets::{PgSnippetStore, SnippetStore};
use crate::users::{Argon2Hasher, PgUserStore, UserStore};

/// Store handles built once at startup and handed to the request layer.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    pub snippets: Arc<dyn SnippetStore>,
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let db = db::connect(&config.database_url).await?;
        Self::from_parts(db, config)
    }

    pub fn from_parts(db: PgPool, config: Arc<AppConfig>) -> anyhow::Result<Self> {
        let hasher = Arc::new(Argon2Hasher::new(config.hashing)?);
        let snippets = Arc::new(PgSnippetStore::new(db.clone())) as Arc<dyn SnippetStore>;
        let users = Arc::new(PgUserStore::new(db.clone(), hasher)) as Arc<dyn UserStore>;

        Ok(Self {
            db,
            config,
            snippets,
            users,
        })
    }
}
