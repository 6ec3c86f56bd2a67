use anyhow::Context;

use crate::config::{AppConfig, StoreBackend};
use crate::database::DatabaseManager;

pub async fn handle(config: AppConfig) -> anyhow::Result<()> {
    if config.store == StoreBackend::Memory {
        anyhow::bail!("STORE_BACKEND=memory has nothing to migrate");
    }

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;
    DatabaseManager::migrate(&pool).await?;
    pool.close().await;

    println!("Migrations applied");
    Ok(())
}
