use std::sync::Arc;

use actix_web::{get, post, put, web};
use uuid::Uuid;

use crate::auth::Principal;
use crate::error::ApiError;
use crate::models::Booking;
use crate::types::CreateBookingRequest;
use crate::AppState;

#[get("")]
pub async fn list_bookings(
    app_state: web::Data<Arc<AppState>>,
    principal: Principal,
) -> Result<web::Json<Vec<Booking>>, ApiError> {
    let bookings = app_state.bookings.list(&principal).await?;
    Ok(web::Json(bookings))
}

#[get("/{booking_id}")]
pub async fn get_booking(
    app_state: web::Data<Arc<AppState>>,
    principal: Principal,
    booking_id: web::Path<Uuid>,
) -> Result<web::Json<Booking>, ApiError> {
    let booking = app_state
        .bookings
        .get(&principal, booking_id.into_inner())
        .await?;
    Ok(web::Json(booking))
}

#[post("")]
pub async fn create_booking(
    app_state: web::Data<Arc<AppState>>,
    principal: Principal,
    web::Json(req): web::Json<CreateBookingRequest>,
) -> Result<web::Json<Booking>, ApiError> {
    let booking = app_state.bookings.create(&principal, req).await?;
    Ok(web::Json(booking))
}

#[put("/{booking_id}/confirm")]
pub async fn confirm_booking(
    app_state: web::Data<Arc<AppState>>,
    principal: Principal,
    booking_id: web::Path<Uuid>,
) -> Result<web::Json<Booking>, ApiError> {
    let booking = app_state
        .bookings
        .confirm(&principal, booking_id.into_inner())
        .await?;
    Ok(web::Json(booking))
}

#[put("/{booking_id}/pay")]
pub async fn pay_booking(
    app_state: web::Data<Arc<AppState>>,
    principal: Principal,
    booking_id: web::Path<Uuid>,
) -> Result<web::Json<Booking>, ApiError> {
    let booking = app_state
        .bookings
        .pay(&principal, booking_id.into_inner())
        .await?;
    Ok(web::Json(booking))
}

#[put("/{booking_id}/cancel")]
pub async fn cancel_booking(
    app_state: web::Data<Arc<AppState>>,
    principal: Principal,
    booking_id: web::Path<Uuid>,
) -> Result<web::Json<Booking>, ApiError> {
    let booking = app_state
        .bookings
        .cancel(&principal, booking_id.into_inner())
        .await?;
    Ok(web::Json(booking))
}
