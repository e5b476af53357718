//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and REST API.
//! Services are generic over the repository trait, but AppState pins them to
//! the SQLite implementation.

use std::sync::Arc;

use ochat_core::chat::orchestrator::ChatOrchestrator;
use ochat_core::conversation::service::ConversationService;
use ochat_core::inference::box_backend::BoxInferenceBackend;
use ochat_infra::inference::create_backend;
use ochat_infra::sqlite::conversation::SqliteConversationRepository;
use ochat_infra::sqlite::pool::DatabasePool;
use ochat_types::config::AppConfig;

pub type ConcreteConversationService = ConversationService<SqliteConversationRepository>;

pub type ConcreteChatOrchestrator = ChatOrchestrator<SqliteConversationRepository>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub conversation_service: Arc<ConcreteConversationService>,
    pub chat: Arc<ConcreteChatOrchestrator>,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Connect to the database and the inference backend named in `config`.
    pub async fn init(config: &AppConfig) -> anyhow::Result<Self> {
        let db_pool = DatabasePool::new(&config.database_url).await?;
        let backend = create_backend(config)?;

        tracing::info!(
            database = %config.database_url,
            backend = %config.backend_url,
            "Application state initialized"
        );

        Ok(Self::from_parts(db_pool, backend))
    }

    /// Wire services over an open pool and an already-built backend.
    pub fn from_parts(db_pool: DatabasePool, backend: BoxInferenceBackend) -> Self {
        let conversation_service =
            ConversationService::new(SqliteConversationRepository::new(db_pool.clone()));
        let chat = ChatOrchestrator::new(
            SqliteConversationRepository::new(db_pool.clone()),
            backend,
        );

        Self {
            conversation_service: Arc::new(conversation_service),
            chat: Arc::new(chat),
            db_pool,
        }
    }
}
