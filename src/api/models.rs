use serde::{Deserialize, Serialize};

use crate::db::models::DbInfo;

/// Body of `POST /api/messages`. Both fields are optional at the serde layer
/// so a missing key reaches the validation branch and gets the contract's
/// fixed 400 body instead of a deserialization error.
#[derive(Debug, Deserialize)]
pub struct CreateMessageRequest {
    pub username: Option<String>,
    pub message: Option<String>,
}

impl CreateMessageRequest {
    pub fn is_valid(&self) -> bool {
        let filled = |field: &Option<String>| field.as_deref().is_some_and(|s| !s.is_empty());
        filled(&self.username) && filled(&self.message)
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DbDebugResponse {
    #[serde(rename = "dbInfo")]
    pub db_info: DbInfo,
    #[serde(rename = "messagesCount")]
    pub messages_count: i64,
}
