pub mod booking;
pub mod document;
pub mod message;
pub mod property;
pub mod room;

pub use booking::{Booking, BookingStatus, PaymentStatus};
pub use document::Document;
pub use message::{EscalationStatus, Message, MessageRole};
pub use property::Property;
pub use room::Room;
