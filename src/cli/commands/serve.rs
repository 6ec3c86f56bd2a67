use std::sync::Arc;

use anyhow::Context;

use crate::config::{AppConfig, StoreBackend};
use crate::database::{DatabaseManager, MemoryPostStore, PgPostStore, PostStore};
use crate::routes;
use crate::state::AppState;

pub async fn handle(config: AppConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Medium API in {:?} mode", config.environment);

    let store: Arc<dyn PostStore> = match config.store {
        StoreBackend::Postgres => {
            let pool = DatabaseManager::connect(&config.database)
                .await
                .context("failed to connect to database")?;
            if config.database.run_migrations {
                DatabaseManager::migrate(&pool).await?;
            }
            Arc::new(PgPostStore::new(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory post store; data is lost on restart");
            Arc::new(MemoryPostStore::new())
        }
    };

    let state = AppState::from_config(&config, store);
    let app = routes::app(state, config.api.enable_request_logging);

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Medium API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
