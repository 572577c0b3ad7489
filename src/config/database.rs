use crate::core::{AppError, Result};
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

use super::parse_env;

/// Schema embedded at compile time and applied on startup
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: u32,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        Ok(DatabaseConfig {
            url: super::env_or("DATABASE_URL", "sqlite://kaabo.db?mode=rwc"),
            pool_size: parse_env("DATABASE_POOL_SIZE", "1")?,
            max_connections: parse_env("DATABASE_MAX_CONNECTIONS", "5")?,
        })
    }

    /// Create a SQLite connection pool
    pub async fn create_pool(&self) -> Result<SqlitePool> {
        let options = SqliteConnectOptions::from_str(&self.url)
            .map_err(|e| AppError::Configuration(format!("Invalid DATABASE_URL: {}", e)))?
            .create_if_missing(true)
            .foreign_keys(true);

        SqlitePoolOptions::new()
            .max_connections(self.max_connections.max(1))
            .min_connections(self.pool_size.min(self.max_connections.max(1)))
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600)) // 10 minutes
            .max_lifetime(Duration::from_secs(1800)) // 30 minutes
            .connect_with(options)
            .await
            .map_err(AppError::Database)
    }
}

/// Apply the embedded schema
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| AppError::internal(format!("Failed to apply schema: {}", e)))
}
