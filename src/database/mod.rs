use crate::repositories::SqliteSettingsRepository;
use crate::services::SettingsService;
use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::str::FromStr;
use std::sync::Arc;

/// Open (creating if needed) the SQLite database and bring its schema up to date.
pub async fn initialize_database(database_url: &str) -> Result<SqlitePool> {
    if !Sqlite::database_exists(database_url).await.unwrap_or(false) {
        Sqlite::create_database(database_url).await?;
        tracing::info!("Created database {}", database_url);
    }

    let options = SqliteConnectOptions::from_str(database_url)?.foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    tracing::info!("Database initialized successfully");
    Ok(pool)
}

/// Store the admin credentials on first start; later starts keep the existing hash.
pub async fn seed_admin(pool: &SqlitePool, username: &str, password: &str) -> Result<()> {
    let settings = SettingsService::new(Arc::new(SqliteSettingsRepository::new(pool.clone())));
    settings
        .seed_admin(username, password)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to seed admin account: {}", e))?;
    Ok(())
}
