use snippetbox::{db, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "snippetbox=debug,sqlx=warn".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let app_state = AppState::init().await?;

    db::run_migrations(&app_state.db).await?;

    let visible = app_state.snippets.latest().await?.len();
    tracing::info!(
        visible_snippets = visible,
        memory_kib = app_state.config.hashing.memory_kib,
        iterations = app_state.config.hashing.iterations,
        "stores ready"
    );

    app_state.db.close().await;
    Ok(())
}
