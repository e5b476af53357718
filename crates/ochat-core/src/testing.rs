//! In-process fakes for the repository and inference ports.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use ochat_types::conversation::{Conversation, ConversationId, Message};
use ochat_types::error::{InferenceError, RepositoryError};
use ochat_types::inference::{GenerateRequest, ModelDescriptor};
use uuid::Uuid;

use crate::conversation::repository::ConversationRepository;
use crate::inference::backend::InferenceBackend;

#[derive(Default)]
struct Tables {
    conversations: Vec<Conversation>,
    messages: Vec<Message>,
}

/// Vec-backed repository with switches for injecting write failures.
#[derive(Default)]
pub struct InMemoryConversationRepository {
    tables: Mutex<Tables>,
    pub fail_titled_append: AtomicBool,
    pub fail_delete_message: AtomicBool,
}

impl InMemoryConversationRepository {
    pub fn message_total(&self) -> usize {
        self.tables.lock().unwrap().messages.len()
    }

    pub fn conversation_total(&self) -> usize {
        self.tables.lock().unwrap().conversations.len()
    }
}

impl ConversationRepository for InMemoryConversationRepository {
    async fn create_conversation(
        &self,
        conversation: &Conversation,
    ) -> Result<Conversation, RepositoryError> {
        self.tables
            .lock()
            .unwrap()
            .conversations
            .push(conversation.clone());
        Ok(conversation.clone())
    }

    async fn get_conversation(
        &self,
        id: &ConversationId,
    ) -> Result<Option<Conversation>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.conversations.iter().find(|c| c.id == *id).cloned())
    }

    async fn list_conversations(&self) -> Result<Vec<Conversation>, RepositoryError> {
        let mut all = self.tables.lock().unwrap().conversations.clone();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn update_title(&self, id: &ConversationId, title: &str) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        let conversation = tables
            .conversations
            .iter_mut()
            .find(|c| c.id == *id)
            .ok_or(RepositoryError::NotFound)?;
        conversation.title = title.to_string();
        Ok(())
    }

    async fn delete_conversation(&self, id: &ConversationId) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.conversations.len();
        tables.conversations.retain(|c| c.id != *id);
        if tables.conversations.len() == before {
            return Err(RepositoryError::NotFound);
        }
        tables.messages.retain(|m| m.conversation_id != *id);
        Ok(())
    }

    async fn append_message(&self, message: &Message) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        if !tables
            .conversations
            .iter()
            .any(|c| c.id == message.conversation_id)
        {
            return Err(RepositoryError::ConstraintViolation(
                "FOREIGN KEY constraint failed".to_string(),
            ));
        }
        tables.messages.push(message.clone());
        Ok(())
    }

    async fn append_message_with_title(
        &self,
        message: &Message,
        title: Option<&str>,
    ) -> Result<(), RepositoryError> {
        if self.fail_titled_append.load(Ordering::SeqCst) {
            return Err(RepositoryError::Query("disk I/O error".to_string()));
        }
        self.append_message(message).await?;
        if let Some(title) = title {
            self.update_title(&message.conversation_id, title).await?;
        }
        Ok(())
    }

    async fn get_messages(&self, id: &ConversationId) -> Result<Vec<Message>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .messages
            .iter()
            .filter(|m| m.conversation_id == *id)
            .cloned()
            .collect())
    }

    async fn count_messages(&self, id: &ConversationId) -> Result<u32, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .messages
            .iter()
            .filter(|m| m.conversation_id == *id)
            .count() as u32)
    }

    async fn delete_message(&self, message_id: &Uuid) -> Result<(), RepositoryError> {
        if self.fail_delete_message.load(Ordering::SeqCst) {
            return Err(RepositoryError::Connection);
        }
        let mut tables = self.tables.lock().unwrap();
        let before = tables.messages.len();
        tables.messages.retain(|m| m.id != *message_id);
        if tables.messages.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

enum Script {
    Reply(String),
    Status(u16),
    Refused,
}

/// Backend that answers every `generate` call the same way and records prompts.
pub struct ScriptedBackend {
    script: Script,
    calls: Arc<Mutex<Vec<GenerateRequest>>>,
}

pub type RecordedCalls = Arc<Mutex<Vec<GenerateRequest>>>;

impl ScriptedBackend {
    fn with_script(script: Script) -> (Self, RecordedCalls) {
        let calls = RecordedCalls::default();
        (
            Self {
                script,
                calls: calls.clone(),
            },
            calls,
        )
    }

    pub fn replying(text: &str) -> (Self, RecordedCalls) {
        Self::with_script(Script::Reply(text.to_string()))
    }

    pub fn failing_with_status(status: u16) -> (Self, RecordedCalls) {
        Self::with_script(Script::Status(status))
    }

    pub fn refusing_connections() -> (Self, RecordedCalls) {
        Self::with_script(Script::Refused)
    }
}

impl InferenceBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn list_models(&self) -> Result<Vec<ModelDescriptor>, InferenceError> {
        match self.script {
            Script::Refused => Err(InferenceError::Connection("connection refused".to_string())),
            _ => Ok(vec![ModelDescriptor::named("llama2:latest")]),
        }
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<String, InferenceError> {
        self.calls.lock().unwrap().push(request.clone());
        match &self.script {
            Script::Reply(text) => Ok(text.clone()),
            Script::Status(status) => Err(InferenceError::Status {
                status: *status,
                body: "internal error".to_string(),
            }),
            Script::Refused => Err(InferenceError::Connection("connection refused".to_string())),
        }
    }
}
