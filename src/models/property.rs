use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::types::PropertyUpdate;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Property {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub location: String,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub images: Vec<String>,
    pub amenities: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Property {
    /// Applies only the fields the caller actually provided.
    pub fn apply_update(&mut self, update: PropertyUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(location) = update.location {
            self.location = location;
        }
        if let Some(contact_name) = update.contact_name {
            self.contact_name = Some(contact_name);
        }
        if let Some(contact_email) = update.contact_email {
            self.contact_email = Some(contact_email);
        }
        if let Some(contact_phone) = update.contact_phone {
            self.contact_phone = Some(contact_phone);
        }
        if let Some(images) = update.images {
            self.images = images;
        }
        if let Some(amenities) = update.amenities {
            self.amenities = amenities;
        }
        self.updated_at = Utc::now();
    }
}

impl Default for Property {
    fn default() -> Self {
        Property {
            id: Uuid::new_v4(),
            name: String::new(),
            description: None,
            location: String::new(),
            contact_name: None,
            contact_email: None,
            contact_phone: None,
            images: Vec::new(),
            amenities: Vec::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}
