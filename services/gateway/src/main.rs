mod config;
mod error;
mod handlers;
mod logging;
mod models;
mod router;
mod state;

use anyhow::Context;
use config::Config;
use ledger::SqliteStore;
use ledger::seed::seed_if_empty;
use router::create_router;
use state::AppState;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::load().context("failed to load config")?;

    logging::init_tracing(config.env)?;

    tracing::info!(env = ?config.env, "starting ledger gateway");
    tracing::debug!(?config, "configuration loaded");

    let store = SqliteStore::open(&config.storage_path, config.storage.options())
        .await
        .with_context(|| {
            format!(
                "failed to open storage at {}",
                config.storage_path.display()
            )
        })?;

    let seeded = seed_if_empty(&store, &config.seed.seed_config()).await;
    if !seeded.is_empty() {
        tracing::info!(count = seeded.len(), "seeded demo accounts");
    }

    let app = create_router(AppState::new(store.clone()), config.http.request_timeout());

    let listener = TcpListener::bind(&config.http_server)
        .await
        .with_context(|| format!("failed to bind {}", config.http_server))?;

    tracing::info!(address = %config.http_server, "starting server");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    store.close().await;
    tracing::info!("server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
