//! Conversation CRUD service.
//!
//! Thin layer over `ConversationRepository` that applies title rules and
//! turns missing conversations into [`ChatError::NotFound`].

use ochat_types::conversation::{
    Conversation, ConversationId, ConversationWithMessages, DEFAULT_CONVERSATION_TITLE,
};
use ochat_types::error::ChatError;
use tracing::info;

use crate::conversation::repository::ConversationRepository;
use crate::conversation::title::clamp_title;

/// Create/list/read/rename/delete conversations.
pub struct ConversationService<R: ConversationRepository> {
    repo: R,
}

impl<R: ConversationRepository> ConversationService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Access the repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Create an empty conversation.
    ///
    /// A blank or missing title falls back to "New Conversation".
    pub async fn create(&self, title: Option<&str>) -> Result<Conversation, ChatError> {
        let title = title
            .map(clamp_title)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_CONVERSATION_TITLE.to_string());

        let conversation = self.repo.create_conversation(&Conversation::new(title)).await?;
        info!(conversation_id = %conversation.id, "Conversation created");
        Ok(conversation)
    }

    /// All conversations, newest first.
    pub async fn list(&self) -> Result<Vec<Conversation>, ChatError> {
        Ok(self.repo.list_conversations().await?)
    }

    /// A conversation with its messages in chronological order.
    pub async fn get(&self, id: &ConversationId) -> Result<ConversationWithMessages, ChatError> {
        let conversation = self
            .repo
            .get_conversation(id)
            .await?
            .ok_or(ChatError::NotFound)?;
        let messages = self.repo.get_messages(id).await?;

        Ok(ConversationWithMessages {
            conversation,
            messages,
        })
    }

    /// Overwrite the title. A missing or blank title is an invalid request.
    pub async fn rename(&self, id: &ConversationId, title: Option<&str>) -> Result<(), ChatError> {
        let title = title
            .map(clamp_title)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ChatError::InvalidRequest("Title is required".to_string()))?;

        self.repo.update_title(id, &title).await?;
        info!(conversation_id = %id, "Conversation renamed");
        Ok(())
    }

    /// Delete a conversation and all of its messages.
    pub async fn delete(&self, id: &ConversationId) -> Result<(), ChatError> {
        self.repo.delete_conversation(id).await?;
        info!(conversation_id = %id, "Conversation deleted");
        Ok(())
    }
}
