//! Chat turn HTTP handler.
//!
//! Endpoints:
//! - POST /api/chat - Send a message and get the model's reply

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use ochat_core::chat::orchestrator::validate_turn;
use ochat_types::conversation::ConversationId;
use ochat_types::error::ChatError;

use super::parse_conversation_id;
use crate::http::error::AppError;
use crate::state::AppState;

/// Request body for a chat turn.
///
/// `model` and `message` are optional at the wire level so that their absence
/// is reported as a 400 with a JSON error rather than a deserialization failure.
/// `conversation_id` is taken as any JSON value; only a UUID string can name a
/// conversation.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub conversation_id: Option<Value>,
}

/// Response body for a completed chat turn.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub model: String,
    pub conversation_id: ConversationId,
}

/// POST /api/chat - Run one chat turn.
pub async fn chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(request) = body?;

    let model = request.model.as_deref().unwrap_or_default();
    let message = request.message.as_deref().unwrap_or_default();
    validate_turn(model, message)?;

    let conversation_id = requested_conversation(request.conversation_id.as_ref())?;

    let reply = state
        .chat
        .submit_turn(model, message, conversation_id)
        .await?;

    Ok(Json(ChatResponse {
        response: reply.response,
        model: reply.model,
        conversation_id: reply.conversation_id,
    }))
}

/// Absent, `null` or blank means a new conversation; anything else must be an id.
fn requested_conversation(raw: Option<&Value>) -> Result<Option<ConversationId>, AppError> {
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => parse_conversation_id(s.trim()).map(Some),
        Some(_) => Err(AppError::Chat(ChatError::NotFound)),
    }
}
