#![cfg(test)]
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;

use configs::DatabaseConfig;
use models::db::{connect_with_config, DATABASE_URL};

// Migrations run once per test process; `false` means no database is reachable
static MIGRATED: OnceCell<bool> = OnceCell::const_new();

fn test_config() -> DatabaseConfig {
    let mut cfg = DatabaseConfig { url: DATABASE_URL.clone(), ..Default::default() };
    cfg.min_connections = 1;
    cfg.connect_timeout_secs = 3;
    cfg.acquire_timeout_secs = 10;
    cfg
}

pub async fn get_db() -> anyhow::Result<DatabaseConnection> {
    let ready = *MIGRATED
        .get_or_init(|| async {
            match connect_with_config(&test_config()).await {
                Ok(db) => migration::Migrator::up(&db, None).await.is_ok(),
                Err(_) => false,
            }
        })
        .await;
    if !ready {
        anyhow::bail!("database unavailable");
    }
    // fresh pool for the current test's runtime
    connect_with_config(&test_config()).await
}
