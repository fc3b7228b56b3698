use serde::Deserialize;

use crate::models::EscalationStatus;

#[derive(Debug, Deserialize)]
pub struct MessageCreate {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct EscalationUpdate {
    pub admin_response: String,
    pub status: EscalationStatus,
}
