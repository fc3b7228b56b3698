use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Flat knowledge-base entry, searched by case-insensitive substring.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub file_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Default for Document {
    fn default() -> Self {
        Document {
            id: Uuid::new_v4(),
            title: String::new(),
            content: String::new(),
            file_url: None,
            created_at: Utc::now(),
        }
    }
}
