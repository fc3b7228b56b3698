pub mod booking;
pub mod chat;

pub use booking::BookingEngine;
pub use chat::ChatEngine;
