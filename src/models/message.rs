use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "message_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "escalation_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EscalationStatus {
    Pending,
    Resolved,
}

/// One turn in a conversation. Assistant and system turns may carry no
/// user id.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub user_id: Option<String>,
    pub conversation_id: String,
    pub role: MessageRole,
    pub content: String,
    pub is_escalation: bool,
    pub escalation_status: Option<EscalationStatus>,
    pub admin_response: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Default for Message {
    fn default() -> Self {
        Message {
            id: Uuid::new_v4(),
            user_id: None,
            conversation_id: String::new(),
            role: MessageRole::User,
            content: String::new(),
            is_escalation: false,
            escalation_status: None,
            admin_response: None,
            created_at: Utc::now(),
        }
    }
}
