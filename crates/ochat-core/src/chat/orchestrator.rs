//! ChatOrchestrator -- sequences a single chat turn.
//!
//! Per-turn state machine:
//!
//! ```text
//! Idle -> ConversationResolved -> UserMessagePersisted -> BackendCalled
//!      -> Success: AssistantMessagePersisted + TitleUpdated
//!      -> Failure: UserMessageRolledBack
//! ```
//!
//! Every step commits eagerly. A new conversation exists before the backend
//! is called, and the user message is durable before the call. A failed turn
//! is undone by deleting the user message; the conversation itself is kept,
//! even when this turn created it.

use ochat_types::conversation::{Conversation, ConversationId, Message};
use ochat_types::error::{ChatError, RepositoryError};
use ochat_types::inference::{GenerateRequest, ModelDescriptor};
use tracing::{debug, error, info, warn};

use crate::conversation::repository::ConversationRepository;
use crate::conversation::title::{initial_title, opening_title};
use crate::inference::box_backend::BoxInferenceBackend;

/// Messages a conversation may hold, including the reply being written, for
/// the turn to count as its opening exchange.
const OPENING_EXCHANGE_MESSAGES: u32 = 2;

/// Reject a turn whose model or message is missing or blank.
///
/// Runs before anything else about the turn is looked at, so callers that
/// parse other inputs first should call it themselves.
pub fn validate_turn(model: &str, message: &str) -> Result<(), ChatError> {
    if model.trim().is_empty() || message.trim().is_empty() {
        return Err(ChatError::InvalidRequest(
            "Model and message are required".to_string(),
        ));
    }
    Ok(())
}

/// Result of a successful turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnReply {
    pub response: String,
    pub model: String,
    pub conversation_id: ConversationId,
}

/// Coordinates the conversation store and the inference backend for one turn.
///
/// Generic over `ConversationRepository` so ochat-core never depends on
/// ochat-infra; the backend is type-erased.
pub struct ChatOrchestrator<R: ConversationRepository> {
    repo: R,
    backend: BoxInferenceBackend,
}

impl<R: ConversationRepository> ChatOrchestrator<R> {
    pub fn new(repo: R, backend: BoxInferenceBackend) -> Self {
        Self { repo, backend }
    }

    /// Access the repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Access the inference backend.
    pub fn backend(&self) -> &BoxInferenceBackend {
        &self.backend
    }

    /// Models offered by the inference backend.
    pub async fn list_models(&self) -> Result<Vec<ModelDescriptor>, ChatError> {
        self.backend.list_models().await.map_err(|e| {
            error!(backend = self.backend.name(), error = %e, "Failed to list models");
            ChatError::from(e)
        })
    }

    /// Run one user turn.
    ///
    /// Without a `conversation_id` a conversation is created, titled with the
    /// first 50 characters of `message`. On success the assistant reply is
    /// stored and, for the opening exchange, the title is replaced by the
    /// first five words of `message` in the same transaction.
    ///
    /// No retry is attempted; backend failures are returned as
    /// [`ChatError::BackendUnavailable`] after the user message is removed.
    #[tracing::instrument(
        name = "submit_turn",
        skip_all,
        fields(model = %model, conversation_id = tracing::field::Empty)
    )]
    pub async fn submit_turn(
        &self,
        model: &str,
        message: &str,
        conversation_id: Option<ConversationId>,
    ) -> Result<TurnReply, ChatError> {
        validate_turn(model, message)?;

        let conversation = self.resolve_conversation(message, conversation_id).await?;
        tracing::Span::current().record("conversation_id", tracing::field::display(conversation.id));
        debug!("Conversation resolved");

        let user_message = Message::user(conversation.id, message, model);
        self.repo.append_message(&user_message).await?;
        debug!(message_id = %user_message.id, "User message persisted");

        let request = GenerateRequest::new(model, message);
        let response = match self.backend.generate(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(backend = self.backend.name(), error = %e, "Inference backend call failed");
                self.roll_back(&user_message).await;
                return Err(e.into());
            }
        };
        debug!(chars = response.chars().count(), "Backend replied");

        let reply = Message::assistant(conversation.id, &response, model);
        if let Err(e) = self.record_reply(&reply, message).await {
            error!(error = %e, "Failed to persist assistant message");
            self.roll_back(&user_message).await;
            return Err(e.into());
        }

        info!("Chat turn completed");
        Ok(TurnReply {
            response,
            model: model.to_string(),
            conversation_id: conversation.id,
        })
    }

    async fn resolve_conversation(
        &self,
        message: &str,
        conversation_id: Option<ConversationId>,
    ) -> Result<Conversation, ChatError> {
        match conversation_id {
            Some(id) => self
                .repo
                .get_conversation(&id)
                .await?
                .ok_or(ChatError::NotFound),
            None => {
                let conversation = Conversation::new(initial_title(message));
                Ok(self.repo.create_conversation(&conversation).await?)
            }
        }
    }

    /// Store the reply; retitle atomically if this is the opening exchange.
    async fn record_reply(&self, reply: &Message, prompt: &str) -> Result<(), RepositoryError> {
        let existing = self.repo.count_messages(&reply.conversation_id).await?;
        let title = (existing < OPENING_EXCHANGE_MESSAGES)
            .then(|| opening_title(prompt))
            .filter(|t| !t.is_empty());

        self.repo
            .append_message_with_title(reply, title.as_deref())
            .await?;
        debug!(retitled = title.is_some(), "Assistant message persisted");
        Ok(())
    }

    /// Compensating delete of the user message of a failed turn.
    async fn roll_back(&self, user_message: &Message) {
        match self.repo.delete_message(&user_message.id).await {
            Ok(()) => debug!(message_id = %user_message.id, "User message rolled back"),
            Err(e) => error!(
                message_id = %user_message.id,
                error = %e,
                "Failed to roll back user message"
            ),
        }
    }
}
