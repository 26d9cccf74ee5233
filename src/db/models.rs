use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Message {
    pub id: i64,
    pub username: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Connection facts reported by the debug endpoint.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DbInfo {
    pub database: Option<String>,
    pub host: String,
    pub port: i64,
}
