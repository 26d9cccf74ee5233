use crate::config::DatabaseConfig;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;
use thiserror::Error;
use tracing::info;

pub type DbPool = MySqlPool;

/// The serving path assumes this table already exists; `init-db` applies it
/// explicitly for fresh databases.
const SCHEMA: &str = include_str!("../../schema.sql");

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database url is not configured (set DATABASE_URL)")]
    MissingUrl,
    #[error(transparent)]
    Connect(#[from] sqlx::Error),
}

pub async fn get_pool(config: &DatabaseConfig) -> Result<DbPool, StoreError> {
    if config.url.is_empty() {
        return Err(StoreError::MissingUrl);
    }

    info!(
        "Creating database pool (max {} connections)",
        config.max_connections
    );
    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;

    Ok(pool)
}

pub async fn init_schema(pool: &DbPool) -> Result<(), sqlx::Error> {
    info!("Applying messages schema");
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    Ok(())
}
