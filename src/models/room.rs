use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::types::RoomUpdate;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Room {
    pub id: Uuid,
    pub property_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub max_occupancy: i32,
    /// Nightly rate. Pricing multiplies this by the number of nights once,
    /// at booking creation.
    pub base_rate: f64,
    pub created_at: DateTime<Utc>,
}

impl Room {
    pub fn apply_update(&mut self, update: RoomUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(max_occupancy) = update.max_occupancy {
            self.max_occupancy = max_occupancy;
        }
        if let Some(base_rate) = update.base_rate {
            self.base_rate = base_rate;
        }
    }
}

impl Default for Room {
    fn default() -> Self {
        Room {
            id: Uuid::new_v4(),
            property_id: Uuid::nil(),
            name: String::new(),
            description: None,
            max_occupancy: 2,
            base_rate: 0.0,
            created_at: Utc::now(),
        }
    }
}
