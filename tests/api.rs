use std::sync::Arc;

use actix_http::Request;
use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    http::StatusCode,
    test, web, App, Error,
};
use serde_json::{json, Value};

use travelmate::auth::{sign_token, Role};
use travelmate::config::AppConfig;
use travelmate::middleware::auth::Authentication;
use travelmate::models::Booking;
use travelmate::routes;
use travelmate::store::Store;
use travelmate::AppState;

const SECRET: &str = "test-secret";

fn test_config() -> Arc<AppConfig> {
    Arc::new(AppConfig {
        jwt_secret: SECRET.to_string(),
        database_url: None,
        bind_addr: "127.0.0.1:0".to_string(),
        api_prefix: "/api".to_string(),
    })
}

async fn spawn_app(
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
    let app_state = Arc::new(AppState::new(Store::in_memory()));
    test::init_service(
        App::new()
            .wrap(Authentication {
                app_config: test_config(),
            })
            .app_data(web::Data::new(app_state))
            .service(routes::index)
            .service(routes::health)
            .service(web::scope("/api").configure(routes::configure)),
    )
    .await
}

fn bearer(user_id: &str, role: Role) -> (&'static str, String) {
    let token = sign_token(user_id, role, SECRET).unwrap();
    ("Authorization", format!("Bearer {}", token))
}

async fn create_property_with_room<S, B>(app: &S) -> (String, String)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/properties")
        .insert_header(bearer("admin-1", Role::Admin))
        .set_json(json!({
            "name": "Sunset Inn",
            "location": "Lisbon",
            "description": "A cozy inn by the sea",
            "amenities": ["wifi", "pool"]
        }))
        .to_request();
    let property: Value = test::call_and_read_body_json(app, req).await;
    let property_id = property["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/api/properties/{}/rooms", property_id))
        .insert_header(bearer("admin-1", Role::Admin))
        .set_json(json!({
            "name": "Sea View Double",
            "max_occupancy": 2,
            "base_rate": 150.0
        }))
        .to_request();
    let room: Value = test::call_and_read_body_json(app, req).await;
    let room_id = room["id"].as_str().unwrap().to_string();

    (property_id, room_id)
}

#[actix_web::test]
async fn health_and_index_are_public() {
    let app = spawn_app().await;

    let res = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(body["status"], "running");
}

#[actix_web::test]
async fn bookings_require_authentication() {
    let app = spawn_app().await;
    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/bookings").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn booking_lifecycle_over_http() {
    let app = spawn_app().await;
    let (property_id, room_id) = create_property_with_room(&app).await;

    // Traveler books 4 nights at $150.
    let req = test::TestRequest::post()
        .uri("/api/bookings")
        .insert_header(bearer("alice", Role::Traveler))
        .set_json(json!({
            "property_id": property_id,
            "room_id": room_id,
            "check_in": "2026-09-01",
            "check_out": "2026-09-05",
            "guests": 2
        }))
        .to_request();
    let booking: Booking = test::call_and_read_body_json(&app, req).await;
    assert_eq!(booking.total_amount, 600.0);
    assert_eq!(booking.user_id, "alice");

    // A traveler may not confirm.
    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/bookings/{}/confirm", booking.id))
            .insert_header(bearer("alice", Role::Traveler))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Paying before confirmation is rejected.
    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/bookings/{}/pay", booking.id))
            .insert_header(bearer("alice", Role::Traveler))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Sales staff confirms and a voucher appears.
    let req = test::TestRequest::put()
        .uri(&format!("/api/bookings/{}/confirm", booking.id))
        .insert_header(bearer("sales-1", Role::PropertySales))
        .to_request();
    let confirmed: Booking = test::call_and_read_body_json(&app, req).await;
    let voucher = confirmed.voucher_code.unwrap();
    assert_eq!(voucher.len(), 8);

    // Only the owner may pay.
    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/bookings/{}/pay", booking.id))
            .insert_header(bearer("mallory", Role::Traveler))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::put()
        .uri(&format!("/api/bookings/{}/pay", booking.id))
        .insert_header(bearer("alice", Role::Traveler))
        .to_request();
    let paid: Booking = test::call_and_read_body_json(&app, req).await;
    assert!(paid.payment_ref.unwrap().starts_with("pi_"));

    // Cancelling a paid booking refunds it.
    let req = test::TestRequest::put()
        .uri(&format!("/api/bookings/{}/cancel", booking.id))
        .insert_header(bearer("alice", Role::Traveler))
        .to_request();
    let cancelled: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(cancelled["status"], "cancelled");
    assert_eq!(cancelled["payment_status"], "refunded");
}

#[actix_web::test]
async fn booking_create_validations() {
    let app = spawn_app().await;
    let (property_id, room_id) = create_property_with_room(&app).await;

    // Unknown room
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/bookings")
            .insert_header(bearer("alice", Role::Traveler))
            .set_json(json!({
                "property_id": property_id,
                "room_id": "00000000-0000-0000-0000-000000000001",
                "check_in": "2026-09-01",
                "check_out": "2026-09-02"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Reversed dates
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/bookings")
            .insert_header(bearer("alice", Role::Traveler))
            .set_json(json!({
                "property_id": property_id,
                "room_id": room_id,
                "check_in": "2026-09-05",
                "check_out": "2026-09-01"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn booking_visibility_by_role() {
    let app = spawn_app().await;
    let (property_id, room_id) = create_property_with_room(&app).await;

    for user in ["alice", "bob"] {
        let req = test::TestRequest::post()
            .uri("/api/bookings")
            .insert_header(bearer(user, Role::Traveler))
            .set_json(json!({
                "property_id": property_id,
                "room_id": room_id,
                "check_in": "2026-09-01",
                "check_out": "2026-09-03"
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    let req = test::TestRequest::get()
        .uri("/api/bookings")
        .insert_header(bearer("admin-1", Role::Admin))
        .to_request();
    let all: Vec<Booking> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all.len(), 2);

    let req = test::TestRequest::get()
        .uri("/api/bookings")
        .insert_header(bearer("alice", Role::Traveler))
        .to_request();
    let own: Vec<Booking> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(own.len(), 1);
    assert_eq!(own[0].user_id, "alice");

    // A stranger's booking is hidden from other travelers.
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/bookings/{}", all[1].id))
            .insert_header(bearer("alice", Role::Traveler))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn chat_escalates_and_admin_resolves() {
    let app = spawn_app().await;

    // Seed a knowledge-base entry (admin only).
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/documents")
            .insert_header(bearer("alice", Role::Traveler))
            .set_json(json!({ "title": "WiFi", "content": "free wifi available" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/documents")
            .insert_header(bearer("admin-1", Role::Admin))
            .set_json(json!({ "title": "WiFi", "content": "free wifi available" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    // Knowledge hit but no property match: reply quotes the document and
    // still escalates.
    let req = test::TestRequest::post()
        .uri("/api/chat")
        .insert_header(bearer("alice", Role::Traveler))
        .set_json(json!({ "message": "wifi", "conversation_id": "conv-1" }))
        .to_request();
    let reply: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(reply["needs_escalation"], true);
    assert!(reply["response"]
        .as_str()
        .unwrap()
        .contains("free wifi available"));

    // Escalation queue is admin only.
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/messages/escalations")
            .insert_header(bearer("alice", Role::Traveler))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/api/messages/escalations")
        .insert_header(bearer("admin-1", Role::Admin))
        .to_request();
    let escalations: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(escalations.len(), 1);
    let message_id = escalations[0]["id"].as_str().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/api/messages/escalations/{}", message_id))
        .insert_header(bearer("admin-1", Role::Admin))
        .set_json(json!({
            "admin_response": "We have confirmed the wifi details for you.",
            "status": "resolved"
        }))
        .to_request();
    let resolved: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(resolved["escalation_status"], "resolved");
    assert_eq!(
        resolved["admin_response"],
        "We have confirmed the wifi details for you."
    );

    // Thread now holds the user turn, the escalated reply, and the
    // admin's relayed answer.
    let req = test::TestRequest::get()
        .uri("/api/messages/conversations/conv-1")
        .insert_header(bearer("alice", Role::Traveler))
        .to_request();
    let thread: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(thread.len(), 3);
    assert_eq!(
        thread[2]["content"],
        "We have confirmed the wifi details for you."
    );
}

#[actix_web::test]
async fn chat_matches_properties_without_escalating() {
    let app = spawn_app().await;
    create_property_with_room(&app).await;

    let req = test::TestRequest::post()
        .uri("/api/chat")
        .insert_header(bearer("alice", Role::Traveler))
        .set_json(json!({ "message": "sunset", "conversation_id": "conv-2" }))
        .to_request();
    let reply: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(reply["needs_escalation"], false);
    let text = reply["response"].as_str().unwrap();
    assert!(text.contains("Sunset Inn"));
    assert!(text.contains("Sea View Double"));
}

#[actix_web::test]
async fn catalog_write_permissions() {
    let app = spawn_app().await;
    let (property_id, room_id) = create_property_with_room(&app).await;

    // property_sales can update but not delete.
    let req = test::TestRequest::put()
        .uri(&format!("/api/properties/{}", property_id))
        .insert_header(bearer("sales-1", Role::PropertySales))
        .set_json(json!({ "description": "Renovated in 2026" }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["description"], "Renovated in 2026");
    // Untouched fields survive the merge.
    assert_eq!(updated["name"], "Sunset Inn");

    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/rooms/{}", room_id))
            .insert_header(bearer("sales-1", Role::PropertySales))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/rooms/{}", room_id))
            .insert_header(bearer("admin-1", Role::Admin))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    // Travelers cannot create properties.
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/properties")
            .insert_header(bearer("alice", Role::Traveler))
            .set_json(json!({ "name": "Nope", "location": "Nowhere" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn error_bodies_carry_a_detail_field() {
    let app = spawn_app().await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/properties/00000000-0000-0000-0000-000000000009")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["detail"], "Property not found");
}
