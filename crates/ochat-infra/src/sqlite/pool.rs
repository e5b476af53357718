//! Connection pools for the conversation database.
//!
//! Writes go through a single connection so SQLite never sees two writers;
//! reads use a small read-only pool on the same WAL-mode file. Foreign keys
//! are switched on for every connection, which is what lets deleting a
//! conversation cascade to its messages.
//!
//! An in-memory URL (`sqlite::memory:`) exists only inside one connection, so
//! in that case readers share the writer.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

const READER_CONNECTIONS: u32 = 8;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Reader and writer pools over one SQLite database.
#[derive(Clone)]
pub struct DatabasePool {
    pub reader: SqlitePool,
    pub writer: SqlitePool,
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

impl DatabasePool {
    /// Open (creating if needed) the database at `database_url` and bring its
    /// schema up to date.
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let in_memory = is_in_memory(database_url);

        let mut options = SqliteConnectOptions::from_str(database_url)?
            .foreign_keys(true)
            .busy_timeout(BUSY_TIMEOUT)
            .create_if_missing(true);
        if !in_memory {
            options = options.journal_mode(SqliteJournalMode::Wal);
        }

        let mut writer_options = SqlitePoolOptions::new().max_connections(1);
        if in_memory {
            // Recycling the only connection would drop the database.
            writer_options = writer_options.idle_timeout(None).max_lifetime(None);
        }
        let writer = writer_options.connect_with(options.clone()).await?;

        sqlx::migrate!("../../migrations").run(&writer).await?;

        let reader = if in_memory {
            writer.clone()
        } else {
            SqlitePoolOptions::new()
                .max_connections(READER_CONNECTIONS)
                .connect_with(options.read_only(true))
                .await?
        };

        tracing::debug!(url = %database_url, in_memory, "Conversation database ready");

        Ok(Self { reader, writer })
    }

    /// Close both pools, waiting for in-flight queries to finish.
    pub async fn close(&self) {
        self.reader.close().await;
        self.writer.close().await;
        tracing::debug!("Conversation database closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn pool_in(dir: &tempfile::TempDir, name: &str) -> DatabasePool {
        let db_path = dir.path().join(name);
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        DatabasePool::new(&url).await.unwrap()
    }

    #[tokio::test]
    async fn test_schema_has_conversation_tables() {
        let dir = tempfile::tempdir().unwrap();
        let pool = pool_in(&dir, "schema.db").await;

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name != '_sqlx_migrations' ORDER BY name",
        )
        .fetch_all(&pool.reader)
        .await
        .unwrap();

        let names: Vec<&str> = tables.iter().map(|t| t.0.as_str()).collect();
        assert_eq!(names, vec!["conversations", "messages"]);
    }

    #[tokio::test]
    async fn test_file_database_uses_wal_and_foreign_keys() {
        let dir = tempfile::tempdir().unwrap();
        let pool = pool_in(&dir, "pragmas.db").await;

        let (journal,): (String,) = sqlx::query_as("PRAGMA journal_mode")
            .fetch_one(&pool.writer)
            .await
            .unwrap();
        assert_eq!(journal.to_lowercase(), "wal");

        let (fk,): (i32,) = sqlx::query_as("PRAGMA foreign_keys")
            .fetch_one(&pool.writer)
            .await
            .unwrap();
        assert_eq!(fk, 1);
    }

    #[tokio::test]
    async fn test_readers_cannot_write() {
        let dir = tempfile::tempdir().unwrap();
        let pool = pool_in(&dir, "readonly.db").await;

        let result = sqlx::query(
            "INSERT INTO conversations (id, title, created_at) VALUES ('x', 't', 'now')",
        )
        .execute(&pool.reader)
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_in_memory_database_shares_one_connection() {
        let pool = DatabasePool::new("sqlite::memory:").await.unwrap();

        sqlx::query("INSERT INTO conversations (id, title, created_at) VALUES ('a', 't', 'now')")
            .execute(&pool.writer)
            .await
            .unwrap();
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM conversations")
            .fetch_one(&pool.reader)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_reopen_after_close_keeps_schema() {
        let dir = tempfile::tempdir().unwrap();
        let first = pool_in(&dir, "reopen.db").await;
        first.close().await;
        assert!(first.writer.is_closed());

        // Already-applied migrations are skipped.
        pool_in(&dir, "reopen.db").await;
    }

    #[test]
    fn test_in_memory_detection() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://file.db?mode=memory"));
        assert!(!is_in_memory("sqlite://ollama_chat.db?mode=rwc"));
    }
}
