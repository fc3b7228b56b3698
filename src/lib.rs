pub mod auth;
pub mod config;
pub mod engine;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod store;
pub mod types;

use engine::{BookingEngine, ChatEngine};
use store::Store;

pub struct AppState {
    pub store: Store,
    pub bookings: BookingEngine,
    pub chat: ChatEngine,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        AppState {
            bookings: BookingEngine::new(store.clone()),
            chat: ChatEngine::new(store.clone()),
            store,
        }
    }
}
