pub mod memory;
pub mod postgres;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Booking, Document, Message, Property, Room};

#[async_trait]
pub trait PropertyStore: Send + Sync {
    async fn insert(&self, property: &Property) -> Result<()>;
    async fn get(&self, id: Uuid) -> Result<Option<Property>>;
    async fn update(&self, property: &Property) -> Result<()>;
    async fn delete(&self, id: Uuid) -> Result<bool>;
    async fn list(&self) -> Result<Vec<Property>>;
}

#[async_trait]
pub trait RoomStore: Send + Sync {
    async fn insert(&self, room: &Room) -> Result<()>;
    async fn get(&self, id: Uuid) -> Result<Option<Room>>;
    async fn update(&self, room: &Room) -> Result<()>;
    async fn delete(&self, id: Uuid) -> Result<bool>;
    async fn list_for_property(&self, property_id: Uuid) -> Result<Vec<Room>>;
}

#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn insert(&self, booking: &Booking) -> Result<()>;
    async fn get(&self, id: Uuid) -> Result<Option<Booking>>;
    async fn update(&self, booking: &Booking) -> Result<()>;
    async fn list(&self) -> Result<Vec<Booking>>;
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Booking>>;
    async fn voucher_exists(&self, code: &str) -> Result<bool>;
}

#[async_trait]
pub trait MessageStore: Send + Sync {
    async fn insert(&self, message: &Message) -> Result<()>;
    async fn get(&self, id: Uuid) -> Result<Option<Message>>;
    async fn update(&self, message: &Message) -> Result<()>;
    /// Thread in chronological order.
    async fn list_conversation(&self, conversation_id: &str) -> Result<Vec<Message>>;
    /// Escalated messages, newest first.
    async fn list_escalations(&self) -> Result<Vec<Message>>;
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert(&self, document: &Document) -> Result<()>;
    async fn delete(&self, id: Uuid) -> Result<bool>;
    /// All documents, newest first.
    async fn list(&self) -> Result<Vec<Document>>;
}

/// One handle per entity, injected into the engines. Swappable between
/// the in-memory backend and Postgres.
#[derive(Clone)]
pub struct Store {
    pub properties: Arc<dyn PropertyStore>,
    pub rooms: Arc<dyn RoomStore>,
    pub bookings: Arc<dyn BookingStore>,
    pub messages: Arc<dyn MessageStore>,
    pub documents: Arc<dyn DocumentStore>,
}

impl Store {
    pub fn in_memory() -> Self {
        let backend = Arc::new(memory::MemoryStore::default());
        Store {
            properties: backend.clone(),
            rooms: backend.clone(),
            bookings: backend.clone(),
            messages: backend.clone(),
            documents: backend,
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        let backend = Arc::new(postgres::PgStore::new(pool));
        Store {
            properties: backend.clone(),
            rooms: backend.clone(),
            bookings: backend.clone(),
            messages: backend.clone(),
            documents: backend,
        }
    }
}
