use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Refunded,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub user_id: String,
    pub property_id: Uuid,
    pub room_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: i32,
    /// Derived once at creation (nightly rate x nights), never recomputed.
    pub total_amount: f64,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub payment_ref: Option<String>,
    pub voucher_code: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Booking {
    fn default() -> Self {
        Booking {
            id: Uuid::new_v4(),
            user_id: String::new(),
            property_id: Uuid::nil(),
            room_id: Uuid::nil(),
            check_in: NaiveDate::default(),
            check_out: NaiveDate::default(),
            guests: 1,
            total_amount: 0.0,
            status: BookingStatus::Pending,
            payment_status: PaymentStatus::Pending,
            payment_ref: None,
            voucher_code: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}
