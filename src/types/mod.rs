mod bookings;
mod chat;
mod documents;
mod messages;
mod properties;

pub use bookings::*;
pub use chat::*;
pub use documents::*;
pub use messages::*;
pub use properties::*;
