use tracing::info;
use uuid::Uuid;

use crate::auth::{allows, Action, Principal};
use crate::error::ApiError;
use crate::models::{EscalationStatus, Message, MessageRole, Property, Room};
use crate::store::Store;
use crate::types::{ChatRequest, ChatResponse, EscalationUpdate};

const KNOWLEDGE_SNIPPET_CHARS: usize = 500;
const DESCRIPTION_SNIPPET_CHARS: usize = 200;
const MAX_PROPERTY_MATCHES: usize = 3;

fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Conversation log, keyword-matching responder, and the escalation
/// lifecycle for threads the responder could not answer.
#[derive(Clone)]
pub struct ChatEngine {
    store: Store,
}

impl ChatEngine {
    pub fn new(store: Store) -> Self {
        ChatEngine { store }
    }

    pub async fn post_user_message(
        &self,
        principal: &Principal,
        conversation_id: &str,
        content: &str,
    ) -> Result<Message, ApiError> {
        let message = Message {
            user_id: Some(principal.user_id.clone()),
            conversation_id: conversation_id.to_string(),
            role: MessageRole::User,
            content: content.to_string(),
            ..Default::default()
        };
        self.store.messages.insert(&message).await?;
        Ok(message)
    }

    pub async fn list_conversation(&self, conversation_id: &str) -> Result<Vec<Message>, ApiError> {
        Ok(self.store.messages.list_conversation(conversation_id).await?)
    }

    /// The `POST /chat` operation: log the user turn, assemble a reply
    /// from the knowledge base and property catalog, log the assistant
    /// turn, escalate when no property matched.
    pub async fn respond(
        &self,
        principal: &Principal,
        req: ChatRequest,
    ) -> Result<ChatResponse, ApiError> {
        self.post_user_message(principal, &req.conversation_id, &req.message)
            .await?;

        let context = self.search_knowledge_base(&req.message).await?;
        let matches = self.search_properties(&req.message).await?;

        let mut parts: Vec<String> = Vec::new();
        if let Some(context) = &context {
            parts.push(format!(
                "Based on our knowledge base: {}",
                truncate_chars(context, KNOWLEDGE_SNIPPET_CHARS)
            ));
        }

        // A knowledge-base hit does not suppress escalation; only a
        // property match does.
        let needs_escalation = matches.is_empty();
        if !matches.is_empty() {
            parts.push("\n\nHere are some properties that match your query:\n".to_string());
            for (property, rooms) in matches.iter().take(MAX_PROPERTY_MATCHES) {
                parts.push(format!("🏨 **{}** ({})", property.name, property.location));
                if let Some(description) = &property.description {
                    parts.push(format!(
                        "   {}",
                        truncate_chars(description, DESCRIPTION_SNIPPET_CHARS)
                    ));
                }
                if !rooms.is_empty() {
                    parts.push("   Available rooms:".to_string());
                    for room in rooms {
                        parts.push(format!("   - {}: ${}/night", room.name, room.base_rate));
                    }
                }
                parts.push(String::new());
            }
        } else {
            parts.push(
                "\n\nI don't have specific properties matching your query. Would you like \
                 me to help you find accommodations? Please let me know your destination, \
                 travel dates, and any preferences."
                    .to_string(),
            );
        }

        let response_text = parts.join("\n");

        let reply = Message {
            user_id: Some(principal.user_id.clone()),
            conversation_id: req.conversation_id.clone(),
            role: MessageRole::Assistant,
            content: response_text.clone(),
            is_escalation: needs_escalation,
            escalation_status: needs_escalation.then_some(EscalationStatus::Pending),
            ..Default::default()
        };
        self.store.messages.insert(&reply).await?;

        if needs_escalation {
            info!(conversation_id = %req.conversation_id, "chat escalated to admins");
        }

        Ok(ChatResponse {
            response: response_text,
            conversation_id: req.conversation_id,
            needs_escalation,
        })
    }

    pub async fn list_escalations(&self, principal: &Principal) -> Result<Vec<Message>, ApiError> {
        if !allows(principal.role, Action::ResolveEscalations) {
            return Err(ApiError::forbidden("Not authorized to view escalations"));
        }
        Ok(self.store.messages.list_escalations().await?)
    }

    pub async fn resolve_escalation(
        &self,
        principal: &Principal,
        message_id: Uuid,
        update: EscalationUpdate,
    ) -> Result<Message, ApiError> {
        if !allows(principal.role, Action::ResolveEscalations) {
            return Err(ApiError::forbidden("Not authorized to resolve escalations"));
        }

        let mut message = self
            .store
            .messages
            .get(message_id)
            .await?
            .ok_or(ApiError::NotFound("Escalation"))?;

        message.admin_response = Some(update.admin_response.clone());
        message.escalation_status = Some(update.status);
        self.store.messages.update(&message).await?;

        // The admin's answer is delivered back into the thread as a
        // regular assistant turn.
        let reply = Message {
            conversation_id: message.conversation_id.clone(),
            role: MessageRole::Assistant,
            content: update.admin_response,
            is_escalation: false,
            escalation_status: Some(EscalationStatus::Resolved),
            ..Default::default()
        };
        self.store.messages.insert(&reply).await?;

        info!(message_id = %message.id, "escalation resolved");
        Ok(message)
    }

    /// First document whose title or content contains the query,
    /// case-insensitively.
    async fn search_knowledge_base(&self, query: &str) -> Result<Option<String>, ApiError> {
        let query_lower = query.to_lowercase();
        let documents = self.store.documents.list().await?;
        Ok(documents
            .into_iter()
            .find(|doc| {
                doc.content.to_lowercase().contains(&query_lower)
                    || doc.title.to_lowercase().contains(&query_lower)
            })
            .map(|doc| doc.content))
    }

    /// Every property whose name, location or description contains the
    /// query, with its rooms.
    async fn search_properties(
        &self,
        query: &str,
    ) -> Result<Vec<(Property, Vec<Room>)>, ApiError> {
        let query_lower = query.to_lowercase();
        let mut results = Vec::new();
        for property in self.store.properties.list().await? {
            let matched = property.name.to_lowercase().contains(&query_lower)
                || property.location.to_lowercase().contains(&query_lower)
                || property
                    .description
                    .as_deref()
                    .map(|d| d.to_lowercase().contains(&query_lower))
                    .unwrap_or(false);
            if matched {
                let rooms = self.store.rooms.list_for_property(property.id).await?;
                results.push((property, rooms));
            }
        }
        Ok(results)
    }
}
