use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::models::{Booking, Document, Message, Property, Room};
use crate::store::{BookingStore, DocumentStore, MessageStore, PropertyStore, RoomStore};

/// Keyed maps standing in for the database. Used when no DATABASE_URL is
/// configured and by the test suite.
#[derive(Default)]
pub struct MemoryStore {
    properties: DashMap<Uuid, Property>,
    rooms: DashMap<Uuid, Room>,
    bookings: DashMap<Uuid, Booking>,
    messages: DashMap<Uuid, Message>,
    documents: DashMap<Uuid, Document>,
}

#[async_trait]
impl PropertyStore for MemoryStore {
    async fn insert(&self, property: &Property) -> Result<()> {
        self.properties.insert(property.id, property.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Property>> {
        Ok(self.properties.get(&id).map(|p| p.value().clone()))
    }

    async fn update(&self, property: &Property) -> Result<()> {
        self.properties.insert(property.id, property.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        Ok(self.properties.remove(&id).is_some())
    }

    async fn list(&self) -> Result<Vec<Property>> {
        let mut all: Vec<Property> = self.properties.iter().map(|p| p.value().clone()).collect();
        all.sort_by_key(|p| p.created_at);
        Ok(all)
    }
}

#[async_trait]
impl RoomStore for MemoryStore {
    async fn insert(&self, room: &Room) -> Result<()> {
        self.rooms.insert(room.id, room.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Room>> {
        Ok(self.rooms.get(&id).map(|r| r.value().clone()))
    }

    async fn update(&self, room: &Room) -> Result<()> {
        self.rooms.insert(room.id, room.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        Ok(self.rooms.remove(&id).is_some())
    }

    async fn list_for_property(&self, property_id: Uuid) -> Result<Vec<Room>> {
        let mut rooms: Vec<Room> = self
            .rooms
            .iter()
            .filter(|r| r.property_id == property_id)
            .map(|r| r.value().clone())
            .collect();
        rooms.sort_by_key(|r| r.created_at);
        Ok(rooms)
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn insert(&self, booking: &Booking) -> Result<()> {
        self.bookings.insert(booking.id, booking.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Booking>> {
        Ok(self.bookings.get(&id).map(|b| b.value().clone()))
    }

    async fn update(&self, booking: &Booking) -> Result<()> {
        self.bookings.insert(booking.id, booking.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Booking>> {
        let mut all: Vec<Booking> = self.bookings.iter().map(|b| b.value().clone()).collect();
        all.sort_by_key(|b| b.created_at);
        Ok(all)
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Booking>> {
        let mut own: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|b| b.user_id == user_id)
            .map(|b| b.value().clone())
            .collect();
        own.sort_by_key(|b| b.created_at);
        Ok(own)
    }

    async fn voucher_exists(&self, code: &str) -> Result<bool> {
        Ok(self
            .bookings
            .iter()
            .any(|b| b.voucher_code.as_deref() == Some(code)))
    }
}

#[async_trait]
impl MessageStore for MemoryStore {
    async fn insert(&self, message: &Message) -> Result<()> {
        self.messages.insert(message.id, message.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Message>> {
        Ok(self.messages.get(&id).map(|m| m.value().clone()))
    }

    async fn update(&self, message: &Message) -> Result<()> {
        self.messages.insert(message.id, message.clone());
        Ok(())
    }

    async fn list_conversation(&self, conversation_id: &str) -> Result<Vec<Message>> {
        let mut thread: Vec<Message> = self
            .messages
            .iter()
            .filter(|m| m.conversation_id == conversation_id)
            .map(|m| m.value().clone())
            .collect();
        thread.sort_by_key(|m| m.created_at);
        Ok(thread)
    }

    async fn list_escalations(&self) -> Result<Vec<Message>> {
        let mut escalations: Vec<Message> = self
            .messages
            .iter()
            .filter(|m| m.is_escalation)
            .map(|m| m.value().clone())
            .collect();
        escalations.sort_by_key(|m| std::cmp::Reverse(m.created_at));
        Ok(escalations)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, document: &Document) -> Result<()> {
        self.documents.insert(document.id, document.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        Ok(self.documents.remove(&id).is_some())
    }

    async fn list(&self) -> Result<Vec<Document>> {
        let mut all: Vec<Document> = self.documents.iter().map(|d| d.value().clone()).collect();
        all.sort_by_key(|d| std::cmp::Reverse(d.created_at));
        Ok(all)
    }
}
