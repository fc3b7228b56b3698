use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Booking, Document, Message, Property, Room};
use crate::store::{BookingStore, DocumentStore, MessageStore, PropertyStore, RoomStore};

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }
}

#[async_trait]
impl PropertyStore for PgStore {
    async fn insert(&self, property: &Property) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO properties
                (id, name, description, location, contact_name, contact_email,
                 contact_phone, images, amenities, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(property.id)
        .bind(&property.name)
        .bind(&property.description)
        .bind(&property.location)
        .bind(&property.contact_name)
        .bind(&property.contact_email)
        .bind(&property.contact_phone)
        .bind(&property.images)
        .bind(&property.amenities)
        .bind(property.created_at)
        .bind(property.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Property>> {
        let property = sqlx::query_as::<_, Property>("SELECT * FROM properties WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(property)
    }

    async fn update(&self, property: &Property) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE properties
            SET name = $2, description = $3, location = $4, contact_name = $5,
                contact_email = $6, contact_phone = $7, images = $8,
                amenities = $9, updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(property.id)
        .bind(&property.name)
        .bind(&property.description)
        .bind(&property.location)
        .bind(&property.contact_name)
        .bind(&property.contact_email)
        .bind(&property.contact_phone)
        .bind(&property.images)
        .bind(&property.amenities)
        .bind(property.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM properties WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<Property>> {
        let properties =
            sqlx::query_as::<_, Property>("SELECT * FROM properties ORDER BY created_at")
                .fetch_all(&self.pool)
                .await?;
        Ok(properties)
    }
}

#[async_trait]
impl RoomStore for PgStore {
    async fn insert(&self, room: &Room) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO rooms
                (id, property_id, name, description, max_occupancy, base_rate, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(room.id)
        .bind(room.property_id)
        .bind(&room.name)
        .bind(&room.description)
        .bind(room.max_occupancy)
        .bind(room.base_rate)
        .bind(room.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Room>> {
        let room = sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(room)
    }

    async fn update(&self, room: &Room) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE rooms
            SET name = $2, description = $3, max_occupancy = $4, base_rate = $5
            WHERE id = $1
            "#,
        )
        .bind(room.id)
        .bind(&room.name)
        .bind(&room.description)
        .bind(room.max_occupancy)
        .bind(room.base_rate)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_for_property(&self, property_id: Uuid) -> Result<Vec<Room>> {
        let rooms = sqlx::query_as::<_, Room>(
            "SELECT * FROM rooms WHERE property_id = $1 ORDER BY created_at",
        )
        .bind(property_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rooms)
    }
}

#[async_trait]
impl BookingStore for PgStore {
    async fn insert(&self, booking: &Booking) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO bookings
                (id, user_id, property_id, room_id, check_in, check_out, guests,
                 total_amount, status, payment_status, payment_ref, voucher_code,
                 notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(booking.id)
        .bind(&booking.user_id)
        .bind(booking.property_id)
        .bind(booking.room_id)
        .bind(booking.check_in)
        .bind(booking.check_out)
        .bind(booking.guests)
        .bind(booking.total_amount)
        .bind(booking.status)
        .bind(booking.payment_status)
        .bind(&booking.payment_ref)
        .bind(&booking.voucher_code)
        .bind(&booking.notes)
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Booking>> {
        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(booking)
    }

    async fn update(&self, booking: &Booking) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE bookings
            SET status = $2, payment_status = $3, payment_ref = $4,
                voucher_code = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(booking.id)
        .bind(booking.status)
        .bind(booking.payment_status)
        .bind(&booking.payment_ref)
        .bind(&booking.voucher_code)
        .bind(booking.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>("SELECT * FROM bookings ORDER BY created_at")
            .fetch_all(&self.pool)
            .await?;
        Ok(bookings)
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE user_id = $1 ORDER BY created_at",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(bookings)
    }

    async fn voucher_exists(&self, code: &str) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM bookings WHERE voucher_code = $1)")
                .bind(code)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }
}

#[async_trait]
impl MessageStore for PgStore {
    async fn insert(&self, message: &Message) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO messages
                (id, user_id, conversation_id, role, content, is_escalation,
                 escalation_status, admin_response, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(message.id)
        .bind(&message.user_id)
        .bind(&message.conversation_id)
        .bind(message.role)
        .bind(&message.content)
        .bind(message.is_escalation)
        .bind(message.escalation_status)
        .bind(&message.admin_response)
        .bind(message.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Message>> {
        let message = sqlx::query_as::<_, Message>("SELECT * FROM messages WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(message)
    }

    async fn update(&self, message: &Message) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE messages
            SET is_escalation = $2, escalation_status = $3, admin_response = $4
            WHERE id = $1
            "#,
        )
        .bind(message.id)
        .bind(message.is_escalation)
        .bind(message.escalation_status)
        .bind(&message.admin_response)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_conversation(&self, conversation_id: &str) -> Result<Vec<Message>> {
        let messages = sqlx::query_as::<_, Message>(
            "SELECT * FROM messages WHERE conversation_id = $1 ORDER BY created_at",
        )
        .bind(conversation_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(messages)
    }

    async fn list_escalations(&self) -> Result<Vec<Message>> {
        let messages = sqlx::query_as::<_, Message>(
            "SELECT * FROM messages WHERE is_escalation = true ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(messages)
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn insert(&self, document: &Document) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO documents (id, title, content, file_url, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(document.id)
        .bind(&document.title)
        .bind(&document.content)
        .bind(&document.file_url)
        .bind(document.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<Document>> {
        let documents =
            sqlx::query_as::<_, Document>("SELECT * FROM documents ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(documents)
    }
}
