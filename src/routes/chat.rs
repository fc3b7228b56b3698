use std::sync::Arc;

use actix_web::{post, web};

use crate::auth::Principal;
use crate::error::ApiError;
use crate::types::{ChatRequest, ChatResponse};
use crate::AppState;

#[post("")]
pub async fn chat(
    app_state: web::Data<Arc<AppState>>,
    principal: Principal,
    web::Json(req): web::Json<ChatRequest>,
) -> Result<web::Json<ChatResponse>, ApiError> {
    let response = app_state.chat.respond(&principal, req).await?;
    Ok(web::Json(response))
}
