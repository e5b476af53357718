//! ConversationRepository trait definition.
//!
//! Provides create/read/update/delete over conversations and read/append
//! over their messages. Uses native async fn in traits (RPITIT).

use ochat_types::conversation::{Conversation, ConversationId, Message};
use ochat_types::error::RepositoryError;
use uuid::Uuid;

/// Repository trait for conversation and message persistence.
///
/// Implementations live in ochat-infra (e.g., `SqliteConversationRepository`).
///
/// Guarantees every implementation must uphold:
/// - deleting a conversation deletes all of its messages;
/// - messages are returned ordered by `created_at` ascending, ties in
///   insertion order;
/// - a message referencing a missing conversation is rejected with
///   [`RepositoryError::ConstraintViolation`].
pub trait ConversationRepository: Send + Sync {
    /// Persist a new conversation.
    fn create_conversation(
        &self,
        conversation: &Conversation,
    ) -> impl std::future::Future<Output = Result<Conversation, RepositoryError>> + Send;

    /// Get a conversation header by its ID.
    fn get_conversation(
        &self,
        id: &ConversationId,
    ) -> impl std::future::Future<Output = Result<Option<Conversation>, RepositoryError>> + Send;

    /// List all conversations, ordered by created_at DESC.
    fn list_conversations(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Conversation>, RepositoryError>> + Send;

    /// Overwrite a conversation's title. `NotFound` if the conversation is absent.
    fn update_title(
        &self,
        id: &ConversationId,
        title: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete a conversation and, by cascade, its messages.
    /// `NotFound` if the conversation is absent.
    fn delete_conversation(
        &self,
        id: &ConversationId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Append a message to its conversation, committed immediately.
    fn append_message(
        &self,
        message: &Message,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Append a message and, when `title` is given, overwrite the owning
    /// conversation's title in the same transaction.
    fn append_message_with_title(
        &self,
        message: &Message,
        title: Option<&str>,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Get messages for a conversation, ordered by created_at ASC.
    fn get_messages(
        &self,
        id: &ConversationId,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, RepositoryError>> + Send;

    /// Number of messages in a conversation.
    fn count_messages(
        &self,
        id: &ConversationId,
    ) -> impl std::future::Future<Output = Result<u32, RepositoryError>> + Send;

    /// Delete a single message. `NotFound` if it does not exist.
    fn delete_message(
        &self,
        message_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
