//! HTTP request handlers.

pub mod chat;
pub mod conversation;
pub mod models;

use ochat_types::conversation::ConversationId;
use ochat_types::error::ChatError;

use crate::http::error::AppError;

/// Parse a conversation id from a path or body value.
///
/// An id that cannot be parsed cannot name a stored conversation, so it is
/// reported as not found rather than as a bad request.
pub(crate) fn parse_conversation_id(raw: &str) -> Result<ConversationId, AppError> {
    raw.parse().map_err(|_| AppError::Chat(ChatError::NotFound))
}
