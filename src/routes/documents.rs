use std::sync::Arc;

use actix_web::{delete, get, post, web, HttpResponse};
use serde_json::json;
use uuid::Uuid;

use crate::auth::{allows, Action, Principal};
use crate::error::ApiError;
use crate::models::Document;
use crate::types::DocumentCreate;
use crate::AppState;

#[get("")]
pub async fn list_documents(
    app_state: web::Data<Arc<AppState>>,
) -> Result<web::Json<Vec<Document>>, ApiError> {
    let documents = app_state.store.documents.list().await?;
    Ok(web::Json(documents))
}

#[post("")]
pub async fn create_document(
    app_state: web::Data<Arc<AppState>>,
    principal: Principal,
    web::Json(req): web::Json<DocumentCreate>,
) -> Result<web::Json<Document>, ApiError> {
    if !allows(principal.role, Action::ManageDocuments) {
        return Err(ApiError::forbidden("Operation not permitted for this role"));
    }

    let document = Document {
        title: req.title,
        content: req.content,
        file_url: req.file_url,
        ..Default::default()
    };
    app_state.store.documents.insert(&document).await?;
    Ok(web::Json(document))
}

#[delete("/{document_id}")]
pub async fn delete_document(
    app_state: web::Data<Arc<AppState>>,
    principal: Principal,
    document_id: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    if !allows(principal.role, Action::ManageDocuments) {
        return Err(ApiError::forbidden("Operation not permitted for this role"));
    }

    let deleted = app_state
        .store
        .documents
        .delete(document_id.into_inner())
        .await?;
    if !deleted {
        return Err(ApiError::NotFound("Document"));
    }
    Ok(HttpResponse::Ok().json(json!({ "message": "Document deleted successfully" })))
}
