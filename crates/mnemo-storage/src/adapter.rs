// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the StorageAdapter trait.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use tokio::sync::OnceCell;
use tracing::debug;

use mnemo_config::model::StorageConfig;
use mnemo_core::types::{AdapterType, HealthStatus};
use mnemo_core::{
    ChatSession, ChatTurn, MemoryRecord, MnemoError, PluginAdapter, Reminder, Scope,
    StorageAdapter,
};

use crate::database::Database;
use crate::queries;

/// SQLite-backed storage adapter.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is lazily initialized on the first
/// call to [`StorageAdapter::initialize`].
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    /// Create a new SqliteStorage with the given configuration.
    ///
    /// The database connection is not opened until `initialize` is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Returns the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, MnemoError> {
        self.db.get().ok_or_else(|| MnemoError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, MnemoError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), MnemoError> {
        if let Some(db) = self.db.get() {
            db.checkpoint().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl StorageAdapter for SqliteStorage {
    async fn initialize(&self) -> Result<(), MnemoError> {
        let db = Database::open(&self.config.database_path).await?;
        self.db.set(db).map_err(|_| MnemoError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), MnemoError> {
        self.db()?.checkpoint().await?;
        debug!("WAL checkpoint complete");
        Ok(())
    }

    // --- Session operations ---

    async fn create_session(&self, session: &ChatSession) -> Result<(), MnemoError> {
        queries::sessions::create_session(self.db()?, session).await
    }

    async fn get_session(&self, id: &str) -> Result<Option<ChatSession>, MnemoError> {
        queries::sessions::get_session(self.db()?, id).await
    }

    async fn list_sessions(&self, user_id: &str) -> Result<Vec<ChatSession>, MnemoError> {
        queries::sessions::list_sessions(self.db()?, user_id).await
    }

    async fn delete_session(&self, id: &str) -> Result<(), MnemoError> {
        queries::sessions::delete_session(self.db()?, id).await
    }

    // --- History operations ---

    async fn append_turn(&self, turn: &ChatTurn) -> Result<(), MnemoError> {
        queries::history::append_turn(self.db()?, turn).await
    }

    async fn get_history(&self, session_id: &str) -> Result<Vec<ChatTurn>, MnemoError> {
        queries::history::get_history(self.db()?, session_id).await
    }

    // --- Memory operations ---

    async fn list_memories(&self) -> Result<Vec<MemoryRecord>, MnemoError> {
        queries::memories::list_memories(self.db()?).await
    }

    async fn create_memory(
        &self,
        scope: &Scope,
        content: &str,
    ) -> Result<MemoryRecord, MnemoError> {
        queries::memories::create_memory(self.db()?, scope, content).await
    }

    async fn delete_memory(&self, id: &str) -> Result<(), MnemoError> {
        queries::memories::delete_memory(self.db()?, id).await
    }

    // --- Reminder operations ---

    async fn create_reminder(
        &self,
        user_id: &str,
        content: &str,
        due_date: NaiveDateTime,
    ) -> Result<Reminder, MnemoError> {
        queries::reminders::create_reminder(self.db()?, user_id, content, due_date).await
    }

    async fn list_reminders(&self, user_id: &str) -> Result<Vec<Reminder>, MnemoError> {
        queries::reminders::list_reminders(self.db()?, user_id).await
    }

    async fn toggle_reminder(&self, id: &str) -> Result<(), MnemoError> {
        queries::reminders::toggle_reminder(self.db()?, id).await
    }

    async fn delete_reminder(&self, id: &str) -> Result<(), MnemoError> {
        queries::reminders::delete_reminder(self.db()?, id).await
    }
}
