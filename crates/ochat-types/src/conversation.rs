//! Conversation and message types.
//!
//! A conversation is a titled, timestamped thread that exclusively owns an
//! ordered list of messages. Messages are immutable once written.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Title given to conversations created without one.
pub const DEFAULT_CONVERSATION_TITLE: &str = "New Conversation";

/// Maximum title length in characters.
pub const MAX_TITLE_CHARS: usize = 200;

/// Unique identifier for a conversation, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationId(pub Uuid);

impl ConversationId {
    /// Create a new ConversationId using UUID v7.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create a ConversationId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ConversationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ConversationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Author of a message.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (role IN ('user', 'assistant'))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A conversation header (no messages).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

impl Conversation {
    /// A fresh conversation with the given title, stamped now.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: ConversationId::new(),
            title: title.into(),
            created_at: Utc::now(),
        }
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new(DEFAULT_CONVERSATION_TITLE)
    }
}

/// One turn in a conversation.
///
/// Messages are ordered by `created_at` within their conversation and are
/// never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub conversation_id: ConversationId,
    pub role: MessageRole,
    pub content: String,
    /// Model that received (user) or produced (assistant) this turn.
    pub model: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn user(conversation_id: ConversationId, content: &str, model: &str) -> Self {
        Self::with_role(conversation_id, MessageRole::User, content, model)
    }

    pub fn assistant(conversation_id: ConversationId, content: &str, model: &str) -> Self {
        Self::with_role(conversation_id, MessageRole::Assistant, content, model)
    }

    fn with_role(
        conversation_id: ConversationId,
        role: MessageRole,
        content: &str,
        model: &str,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            conversation_id,
            role,
            content: content.to_string(),
            model: model.to_string(),
            created_at: Utc::now(),
        }
    }
}

/// A conversation together with its messages in read order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationWithMessages {
    #[serde(flatten)]
    pub conversation: Conversation,
    pub messages: Vec<Message>,
}
