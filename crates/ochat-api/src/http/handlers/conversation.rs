//! Conversation CRUD HTTP handlers.
//!
//! Endpoints:
//! - GET    /api/conversations      - List conversations, newest first
//! - POST   /api/conversations      - Create an empty conversation
//! - GET    /api/conversations/{id} - Get a conversation with its messages
//! - PUT    /api/conversations/{id} - Rename a conversation
//! - DELETE /api/conversations/{id} - Delete a conversation and its messages

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use ochat_types::conversation::{Conversation, Message, MessageRole};

use super::parse_conversation_id;
use crate::http::error::AppError;
use crate::state::AppState;

/// Request body for creating a conversation.
#[derive(Debug, Default, Deserialize)]
pub struct CreateConversationRequest {
    #[serde(default)]
    pub title: Option<String>,
}

/// Request body for renaming a conversation.
#[derive(Debug, Deserialize)]
pub struct UpdateConversationRequest {
    #[serde(default)]
    pub title: Option<String>,
}

/// A message as shown inside a conversation transcript.
#[derive(Debug, Serialize)]
pub struct MessageView {
    pub role: MessageRole,
    pub content: String,
    pub model: String,
    pub created_at: DateTime<Utc>,
}

impl From<Message> for MessageView {
    fn from(m: Message) -> Self {
        Self {
            role: m.role,
            content: m.content,
            model: m.model,
            created_at: m.created_at,
        }
    }
}

/// Full conversation transcript.
#[derive(Debug, Serialize)]
pub struct ConversationDetail {
    #[serde(flatten)]
    pub conversation: Conversation,
    pub messages: Vec<MessageView>,
}

/// GET /api/conversations - List conversations, newest first.
pub async fn list_conversations(
    State(state): State<AppState>,
) -> Result<Json<Vec<Conversation>>, AppError> {
    let conversations = state.conversation_service.list().await?;
    Ok(Json(conversations))
}

/// POST /api/conversations - Create an empty conversation.
///
/// The body is optional; without one the conversation gets the default title.
pub async fn create_conversation(
    State(state): State<AppState>,
    body: Result<Json<CreateConversationRequest>, JsonRejection>,
) -> Result<Json<Conversation>, AppError> {
    let request = match body {
        Ok(Json(request)) => request,
        Err(JsonRejection::MissingJsonContentType(_)) => CreateConversationRequest::default(),
        Err(rejection) => return Err(rejection.into()),
    };

    let conversation = state
        .conversation_service
        .create(request.title.as_deref())
        .await?;
    Ok(Json(conversation))
}

/// GET /api/conversations/{id} - Get a conversation with its messages.
pub async fn get_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ConversationDetail>, AppError> {
    let id = parse_conversation_id(&id)?;
    let full = state.conversation_service.get(&id).await?;

    Ok(Json(ConversationDetail {
        conversation: full.conversation,
        messages: full.messages.into_iter().map(MessageView::from).collect(),
    }))
}

/// PUT /api/conversations/{id} - Rename a conversation.
pub async fn update_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateConversationRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let id = parse_conversation_id(&id)?;
    let Json(request) = body?;

    state
        .conversation_service
        .rename(&id, request.title.as_deref())
        .await?;
    Ok(Json(json!({ "success": true })))
}

/// DELETE /api/conversations/{id} - Delete a conversation and its messages.
pub async fn delete_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = parse_conversation_id(&id)?;
    state.conversation_service.delete(&id).await?;
    Ok(Json(json!({ "success": true })))
}
