//! SQLite conversation repository implementation.
//!
//! Implements `ConversationRepository` from `ochat-core` using sqlx with split
//! read/write pools: raw queries, private Row structs, reads on the reader
//! pool and writes on the single writer connection.

use chrono::{DateTime, SecondsFormat, Utc};
use ochat_core::conversation::repository::ConversationRepository;
use ochat_types::conversation::{Conversation, ConversationId, Message, MessageRole};
use ochat_types::error::RepositoryError;
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ConversationRepository`.
#[derive(Clone)]
pub struct SqliteConversationRepository {
    pool: DatabasePool,
}

impl SqliteConversationRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct ConversationRow {
    id: String,
    title: String,
    created_at: String,
}

impl ConversationRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_conversation(self) -> Result<Conversation, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid conversation id: {e}")))?;

        Ok(Conversation {
            id: ConversationId(id),
            title: self.title,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

struct MessageRow {
    id: String,
    conversation_id: String,
    role: String,
    content: String,
    model: String,
    created_at: String,
}

impl MessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            conversation_id: row.try_get("conversation_id")?,
            role: row.try_get("role")?,
            content: row.try_get("content")?,
            model: row.try_get("model")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_message(self) -> Result<Message, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid message id: {e}")))?;
        let conversation_id = Uuid::parse_str(&self.conversation_id)
            .map_err(|e| RepositoryError::Query(format!("invalid conversation_id: {e}")))?;
        let role: MessageRole = self.role.parse().map_err(RepositoryError::Query)?;

        Ok(Message {
            id,
            conversation_id: ConversationId(conversation_id),
            role,
            content: self.content,
            model: self.model,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

/// Fixed-width so that string order in SQLite equals chronological order.
fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn map_sqlx_error(e: sqlx::Error) -> RepositoryError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.message().contains("FOREIGN KEY") => {
            RepositoryError::ConstraintViolation(db_err.message().to_string())
        }
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            RepositoryError::Connection
        }
        other => RepositoryError::Query(other.to_string()),
    }
}

async fn insert_message<'e, E>(executor: E, message: &Message) -> Result<(), RepositoryError>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    sqlx::query(
        r#"INSERT INTO messages (id, conversation_id, role, content, model, created_at)
           VALUES (?, ?, ?, ?, ?, ?)"#,
    )
    .bind(message.id.to_string())
    .bind(message.conversation_id.to_string())
    .bind(message.role.to_string())
    .bind(&message.content)
    .bind(&message.model)
    .bind(format_datetime(&message.created_at))
    .execute(executor)
    .await
    .map_err(map_sqlx_error)?;

    Ok(())
}

// ---------------------------------------------------------------------------
// ConversationRepository implementation
// ---------------------------------------------------------------------------

impl ConversationRepository for SqliteConversationRepository {
    async fn create_conversation(
        &self,
        conversation: &Conversation,
    ) -> Result<Conversation, RepositoryError> {
        sqlx::query("INSERT INTO conversations (id, title, created_at) VALUES (?, ?, ?)")
            .bind(conversation.id.to_string())
            .bind(&conversation.title)
            .bind(format_datetime(&conversation.created_at))
            .execute(&self.pool.writer)
            .await
            .map_err(map_sqlx_error)?;

        Ok(conversation.clone())
    }

    async fn get_conversation(
        &self,
        id: &ConversationId,
    ) -> Result<Option<Conversation>, RepositoryError> {
        let row = sqlx::query("SELECT id, title, created_at FROM conversations WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(map_sqlx_error)?;

        match row {
            Some(row) => {
                let conversation_row =
                    ConversationRow::from_row(&row).map_err(map_sqlx_error)?;
                Ok(Some(conversation_row.into_conversation()?))
            }
            None => Ok(None),
        }
    }

    async fn list_conversations(&self) -> Result<Vec<Conversation>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, title, created_at FROM conversations ORDER BY created_at DESC, rowid DESC",
        )
        .fetch_all(&self.pool.reader)
        .await
        .map_err(map_sqlx_error)?;

        let mut conversations = Vec::with_capacity(rows.len());
        for row in &rows {
            let conversation_row = ConversationRow::from_row(row).map_err(map_sqlx_error)?;
            conversations.push(conversation_row.into_conversation()?);
        }

        Ok(conversations)
    }

    async fn update_title(&self, id: &ConversationId, title: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE conversations SET title = ? WHERE id = ?")
            .bind(title)
            .bind(id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn delete_conversation(&self, id: &ConversationId) -> Result<(), RepositoryError> {
        // Messages go with it via ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM conversations WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn append_message(&self, message: &Message) -> Result<(), RepositoryError> {
        insert_message(&self.pool.writer, message).await
    }

    async fn append_message_with_title(
        &self,
        message: &Message,
        title: Option<&str>,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.writer.begin().await.map_err(map_sqlx_error)?;

        insert_message(&mut *tx, message).await?;

        if let Some(title) = title {
            let result = sqlx::query("UPDATE conversations SET title = ? WHERE id = ?")
                .bind(title)
                .bind(message.conversation_id.to_string())
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx_error)?;

            if result.rows_affected() == 0 {
                return Err(RepositoryError::NotFound);
            }
        }

        tx.commit().await.map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn get_messages(&self, id: &ConversationId) -> Result<Vec<Message>, RepositoryError> {
        let rows = sqlx::query(
            r#"SELECT id, conversation_id, role, content, model, created_at
               FROM messages WHERE conversation_id = ?
               ORDER BY created_at ASC, rowid ASC"#,
        )
        .bind(id.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(map_sqlx_error)?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in &rows {
            let message_row = MessageRow::from_row(row).map_err(map_sqlx_error)?;
            messages.push(message_row.into_message()?);
        }

        Ok(messages)
    }

    async fn count_messages(&self, id: &ConversationId) -> Result<u32, RepositoryError> {
        // Read on the writer so a count taken right after an append sees it.
        let row = sqlx::query("SELECT COUNT(*) as cnt FROM messages WHERE conversation_id = ?")
            .bind(id.to_string())
            .fetch_one(&self.pool.writer)
            .await
            .map_err(map_sqlx_error)?;

        let count: i64 = row.try_get("cnt").map_err(map_sqlx_error)?;

        Ok(count as u32)
    }

    async fn delete_message(&self, message_id: &Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM messages WHERE id = ?")
            .bind(message_id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
