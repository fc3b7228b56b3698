use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PropertyCreate {
    pub name: String,
    pub description: Option<String>,
    pub location: String,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Default, Deserialize)]
pub struct PropertyUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub images: Option<Vec<String>>,
    pub amenities: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct RoomCreate {
    pub name: String,
    pub description: Option<String>,
    #[serde(default = "default_occupancy")]
    pub max_occupancy: i32,
    #[serde(default)]
    pub base_rate: f64,
}

#[derive(Debug, Default, Deserialize)]
pub struct RoomUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub max_occupancy: Option<i32>,
    pub base_rate: Option<f64>,
}

fn default_occupancy() -> i32 {
    2
}
