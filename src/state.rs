use std::str::FromStr;

use sea_orm::{DatabaseConnection, SqlxSqliteConnector};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::config::Config;
use crate::hub::BroadcastHub;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// SeaORM connection over the shared SQLite pool
    pub db: DatabaseConnection,
    pub config: Config,
    /// Live board update fan-out
    pub hub: BroadcastHub,
}

impl AppState {
    /// Create a new AppState: open the pool, run migrations, wrap it for SeaORM
    pub async fn new(config: Config) -> Result<Self, AppStateError> {
        let pool = connect_pool(&config).await?;

        // Run migrations
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| AppStateError::Migration(e.to_string()))?;

        let db = SqlxSqliteConnector::from_sqlx_sqlite_pool(pool);

        Ok(Self {
            db,
            config,
            hub: BroadcastHub::new(),
        })
    }
}

async fn connect_pool(config: &Config) -> Result<SqlitePool, AppStateError> {
    let options = SqliteConnectOptions::from_str(&config.database_url)
        .map_err(|e| AppStateError::Database(e.to_string()))?
        .create_if_missing(true)
        .foreign_keys(true);

    if let Some(dir) = options.get_filename().parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir).map_err(|e| AppStateError::Database(e.to_string()))?;
        }
    }

    SqlitePoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect_with(options)
        .await
        .map_err(|e| AppStateError::Database(e.to_string()))
}

#[derive(Debug, thiserror::Error)]
pub enum AppStateError {
    #[error("SQLite connection error: {0}")]
    Database(String),

    #[error("Migration error: {0}")]
    Migration(String),
}
