use std::sync::Arc;

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde_json::json;
use uuid::Uuid;

use crate::auth::{allows, Action, Principal};
use crate::error::ApiError;
use crate::models::{Property, Room};
use crate::types::{PropertyCreate, PropertyUpdate, RoomCreate, RoomUpdate};
use crate::AppState;

fn require(principal: &Principal, action: Action) -> Result<(), ApiError> {
    if allows(principal.role, action) {
        Ok(())
    } else {
        Err(ApiError::forbidden("Operation not permitted for this role"))
    }
}

#[get("")]
pub async fn list_properties(
    app_state: web::Data<Arc<AppState>>,
) -> Result<web::Json<Vec<Property>>, ApiError> {
    let properties = app_state.store.properties.list().await?;
    Ok(web::Json(properties))
}

#[get("/{property_id}")]
pub async fn get_property(
    app_state: web::Data<Arc<AppState>>,
    property_id: web::Path<Uuid>,
) -> Result<web::Json<Property>, ApiError> {
    let property = app_state
        .store
        .properties
        .get(property_id.into_inner())
        .await?
        .ok_or(ApiError::NotFound("Property"))?;
    Ok(web::Json(property))
}

#[post("")]
pub async fn create_property(
    app_state: web::Data<Arc<AppState>>,
    principal: Principal,
    web::Json(req): web::Json<PropertyCreate>,
) -> Result<web::Json<Property>, ApiError> {
    require(&principal, Action::ManageCatalog)?;

    let property = Property {
        name: req.name,
        description: req.description,
        location: req.location,
        contact_name: req.contact_name,
        contact_email: req.contact_email,
        contact_phone: req.contact_phone,
        images: req.images,
        amenities: req.amenities,
        ..Default::default()
    };
    app_state.store.properties.insert(&property).await?;
    Ok(web::Json(property))
}

#[put("/{property_id}")]
pub async fn update_property(
    app_state: web::Data<Arc<AppState>>,
    principal: Principal,
    property_id: web::Path<Uuid>,
    web::Json(req): web::Json<PropertyUpdate>,
) -> Result<web::Json<Property>, ApiError> {
    require(&principal, Action::ManageCatalog)?;

    let mut property = app_state
        .store
        .properties
        .get(property_id.into_inner())
        .await?
        .ok_or(ApiError::NotFound("Property"))?;
    property.apply_update(req);
    app_state.store.properties.update(&property).await?;
    Ok(web::Json(property))
}

#[delete("/{property_id}")]
pub async fn delete_property(
    app_state: web::Data<Arc<AppState>>,
    principal: Principal,
    property_id: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    require(&principal, Action::DeleteCatalog)?;

    let deleted = app_state
        .store
        .properties
        .delete(property_id.into_inner())
        .await?;
    if !deleted {
        return Err(ApiError::NotFound("Property"));
    }
    Ok(HttpResponse::Ok().json(json!({ "message": "Property deleted successfully" })))
}

#[get("/{property_id}/rooms")]
pub async fn list_rooms(
    app_state: web::Data<Arc<AppState>>,
    property_id: web::Path<Uuid>,
) -> Result<web::Json<Vec<Room>>, ApiError> {
    let rooms = app_state
        .store
        .rooms
        .list_for_property(property_id.into_inner())
        .await?;
    Ok(web::Json(rooms))
}

#[post("/{property_id}/rooms")]
pub async fn create_room(
    app_state: web::Data<Arc<AppState>>,
    principal: Principal,
    property_id: web::Path<Uuid>,
    web::Json(req): web::Json<RoomCreate>,
) -> Result<web::Json<Room>, ApiError> {
    require(&principal, Action::ManageCatalog)?;

    let property_id = property_id.into_inner();
    app_state
        .store
        .properties
        .get(property_id)
        .await?
        .ok_or(ApiError::NotFound("Property"))?;

    let room = Room {
        property_id,
        name: req.name,
        description: req.description,
        max_occupancy: req.max_occupancy,
        base_rate: req.base_rate,
        ..Default::default()
    };
    app_state.store.rooms.insert(&room).await?;
    Ok(web::Json(room))
}

#[put("/{room_id}")]
pub async fn update_room(
    app_state: web::Data<Arc<AppState>>,
    principal: Principal,
    room_id: web::Path<Uuid>,
    web::Json(req): web::Json<RoomUpdate>,
) -> Result<web::Json<Room>, ApiError> {
    require(&principal, Action::ManageCatalog)?;

    let mut room = app_state
        .store
        .rooms
        .get(room_id.into_inner())
        .await?
        .ok_or(ApiError::NotFound("Room"))?;
    room.apply_update(req);
    app_state.store.rooms.update(&room).await?;
    Ok(web::Json(room))
}

#[delete("/{room_id}")]
pub async fn delete_room(
    app_state: web::Data<Arc<AppState>>,
    principal: Principal,
    room_id: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    require(&principal, Action::DeleteCatalog)?;

    let deleted = app_state.store.rooms.delete(room_id.into_inner()).await?;
    if !deleted {
        return Err(ApiError::NotFound("Room"));
    }
    Ok(HttpResponse::Ok().json(json!({ "message": "Room deleted successfully" })))
}
