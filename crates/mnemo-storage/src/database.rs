// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and schema.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. Do NOT create additional Connection instances for writes.

use mnemo_core::MnemoError;
use tokio_rusqlite::Connection;
use tracing::debug;

/// Convert tokio_rusqlite errors into [`MnemoError::Storage`].
pub fn map_tr_err(e: tokio_rusqlite::Error) -> MnemoError {
    MnemoError::Storage {
        source: Box::new(e),
    }
}

/// Schema applied on open. Idempotent.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS sessions (
    id TEXT PRIMARY KEY NOT NULL,
    user_id TEXT NOT NULL,
    title TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE TABLE IF NOT EXISTS chat_history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    session_id TEXT NOT NULL,
    user_id TEXT NOT NULL,
    role TEXT NOT NULL,
    content TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);
CREATE INDEX IF NOT EXISTS idx_history_session ON chat_history(session_id, id);

CREATE TABLE IF NOT EXISTS memories (
    id TEXT PRIMARY KEY NOT NULL,
    user_id TEXT,
    content TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);
CREATE INDEX IF NOT EXISTS idx_memories_user ON memories(user_id);

CREATE TABLE IF NOT EXISTS reminders (
    id TEXT PRIMARY KEY NOT NULL,
    user_id TEXT NOT NULL,
    content TEXT NOT NULL,
    due_date TEXT NOT NULL,
    completed INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);
CREATE INDEX IF NOT EXISTS idx_reminders_user ON reminders(user_id, due_date);
";

/// Handle to the single SQLite connection.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (or creates) the database at `path`, applies PRAGMAs and schema.
    pub async fn open(path: &str) -> Result<Self, MnemoError> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| map_tr_err(e.into()))?;

        conn.call(|conn| -> Result<(), rusqlite::Error> {
            conn.execute_batch(
                "PRAGMA journal_mode = WAL;
                 PRAGMA synchronous = NORMAL;
                 PRAGMA foreign_keys = ON;
                 PRAGMA busy_timeout = 5000;",
            )?;
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        debug!(path, "database opened");
        Ok(Self { conn })
    }

    /// Opens an in-memory database with the schema applied. Test helper.
    pub async fn open_in_memory() -> Result<Self, MnemoError> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| map_tr_err(e.into()))?;
        conn.call(|conn| -> Result<(), rusqlite::Error> {
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;
        Ok(Self { conn })
    }

    /// Returns the underlying connection for query modules.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Checkpoints the WAL. Called on close/shutdown.
    pub async fn checkpoint(&self) -> Result<(), MnemoError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn open_creates_database_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");
        let _db = Database::open(path.to_str().unwrap()).await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn schema_is_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("twice.db");
        let db = Database::open(path.to_str().unwrap()).await.unwrap();
        drop(db);
        // Re-open runs the same schema again without error.
        let _db = Database::open(path.to_str().unwrap()).await.unwrap();
    }

    #[tokio::test]
    async fn checkpoint_succeeds() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ckpt.db");
        let db = Database::open(path.to_str().unwrap()).await.unwrap();
        db.checkpoint().await.unwrap();
    }
}
