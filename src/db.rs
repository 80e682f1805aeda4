use anyhow::Context;
use sqlx::{migrate::Migrator, postgres::PgPoolOptions, PgPool};
use tracing::error;

use crate::error::StoreError;

/// Schema migrations embedded from `./migrations`.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Open the shared pool and make sure the database answers.
pub async fn connect(database_url: &str) -> anyhow::Result<PgPool> {
    let db = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .context("connect to database")?;

    if let Err(e) = ping(&db).await {
        db.close().await;
        return Err(e).context("ping database");
    }
    Ok(db)
}

pub async fn ping(db: &PgPool) -> Result<(), StoreError> {
    sqlx::query("SELECT 1")
        .execute(db)
        .await
        .map_err(|e| storage_failure("ping database", e))?;
    Ok(())
}

pub async fn run_migrations(db: &PgPool) -> anyhow::Result<()> {
    MIGRATOR.run(db).await.context("run migrations")
}

/// Log the driver error and wrap it so its text stays out of `Display`.
pub(crate) fn storage_failure(context: &'static str, e: sqlx::Error) -> StoreError {
    error!(error = %e, context, "storage operation failed");
    StoreError::storage(context, e)
}
