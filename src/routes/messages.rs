use std::sync::Arc;

use actix_web::{get, post, put, web};
use uuid::Uuid;

use crate::auth::Principal;
use crate::error::ApiError;
use crate::models::Message;
use crate::types::{EscalationUpdate, MessageCreate};
use crate::AppState;

#[get("/conversations/{conversation_id}")]
pub async fn get_conversation(
    app_state: web::Data<Arc<AppState>>,
    _principal: Principal,
    conversation_id: web::Path<String>,
) -> Result<web::Json<Vec<Message>>, ApiError> {
    let messages = app_state.chat.list_conversation(&conversation_id).await?;
    Ok(web::Json(messages))
}

#[post("/conversations/{conversation_id}")]
pub async fn post_message(
    app_state: web::Data<Arc<AppState>>,
    principal: Principal,
    conversation_id: web::Path<String>,
    web::Json(req): web::Json<MessageCreate>,
) -> Result<web::Json<Message>, ApiError> {
    let message = app_state
        .chat
        .post_user_message(&principal, &conversation_id, &req.content)
        .await?;
    Ok(web::Json(message))
}

#[get("/escalations")]
pub async fn list_escalations(
    app_state: web::Data<Arc<AppState>>,
    principal: Principal,
) -> Result<web::Json<Vec<Message>>, ApiError> {
    let messages = app_state.chat.list_escalations(&principal).await?;
    Ok(web::Json(messages))
}

#[put("/escalations/{message_id}")]
pub async fn resolve_escalation(
    app_state: web::Data<Arc<AppState>>,
    principal: Principal,
    message_id: web::Path<Uuid>,
    web::Json(req): web::Json<EscalationUpdate>,
) -> Result<web::Json<Message>, ApiError> {
    let message = app_state
        .chat
        .resolve_escalation(&principal, message_id.into_inner(), req)
        .await?;
    Ok(web::Json(message))
}
