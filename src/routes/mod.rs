pub mod bookings;
pub mod chat;
pub mod documents;
pub mod messages;
pub mod properties;

use actix_web::{get, web, HttpResponse, Responder};
use serde_json::json;

#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "name": "TravelMate AI",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "healthy" }))
}

/// Registers every API resource. The caller wraps this in the API prefix
/// scope; `index` and `health` live at the root.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/bookings")
            .service(bookings::list_bookings)
            .service(bookings::get_booking)
            .service(bookings::create_booking)
            .service(bookings::confirm_booking)
            .service(bookings::pay_booking)
            .service(bookings::cancel_booking),
    )
    .service(web::scope("/chat").service(chat::chat))
    .service(
        web::scope("/messages")
            .service(messages::get_conversation)
            .service(messages::post_message)
            .service(messages::list_escalations)
            .service(messages::resolve_escalation),
    )
    .service(
        web::scope("/properties")
            .service(properties::list_properties)
            .service(properties::get_property)
            .service(properties::create_property)
            .service(properties::update_property)
            .service(properties::delete_property)
            .service(properties::list_rooms)
            .service(properties::create_room),
    )
    .service(
        web::scope("/rooms")
            .service(properties::update_room)
            .service(properties::delete_room),
    )
    .service(
        web::scope("/documents")
            .service(documents::list_documents)
            .service(documents::create_document)
            .service(documents::delete_document),
    );
}
