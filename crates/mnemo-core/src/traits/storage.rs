// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter trait for the relational persistence backend.
//!
//! The core treats persistence as an external collaborator exposing CRUD
//! operations over sessions, chat history, memories, and reminders. The
//! index subsystem only ever reads memory snapshots via
//! [`StorageAdapter::list_memories`]; it never writes.

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::error::MnemoError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ChatSession, ChatTurn, MemoryRecord, Reminder, Scope};

/// Adapter for the relational storage backend.
#[async_trait]
pub trait StorageAdapter: PluginAdapter {
    /// Initializes the storage backend (schema, connection).
    async fn initialize(&self) -> Result<(), MnemoError>;

    /// Closes the storage backend, flushing pending writes.
    async fn close(&self) -> Result<(), MnemoError>;

    // --- Session operations ---

    /// Creates a new chat session.
    async fn create_session(&self, session: &ChatSession) -> Result<(), MnemoError>;

    /// Gets a session by id.
    async fn get_session(&self, id: &str) -> Result<Option<ChatSession>, MnemoError>;

    /// Lists a user's sessions, newest first.
    async fn list_sessions(&self, user_id: &str) -> Result<Vec<ChatSession>, MnemoError>;

    /// Deletes a session and its history.
    async fn delete_session(&self, id: &str) -> Result<(), MnemoError>;

    // --- History operations ---

    /// Appends one turn to a session's history.
    async fn append_turn(&self, turn: &ChatTurn) -> Result<(), MnemoError>;

    /// Returns a session's history in chronological order.
    async fn get_history(&self, session_id: &str) -> Result<Vec<ChatTurn>, MnemoError>;

    // --- Memory operations ---

    /// Returns a snapshot of all memory records across every scope.
    async fn list_memories(&self) -> Result<Vec<MemoryRecord>, MnemoError>;

    /// Persists a new memory fact and returns the stored record.
    async fn create_memory(&self, scope: &Scope, content: &str)
        -> Result<MemoryRecord, MnemoError>;

    /// Deletes a memory by id.
    async fn delete_memory(&self, id: &str) -> Result<(), MnemoError>;

    // --- Reminder operations ---

    /// Persists a new reminder and returns the stored record.
    async fn create_reminder(
        &self,
        user_id: &str,
        content: &str,
        due_date: NaiveDateTime,
    ) -> Result<Reminder, MnemoError>;

    /// Lists a user's reminders, soonest due first.
    async fn list_reminders(&self, user_id: &str) -> Result<Vec<Reminder>, MnemoError>;

    /// Flips a reminder's completed flag.
    async fn toggle_reminder(&self, id: &str) -> Result<(), MnemoError>;

    /// Deletes a reminder by id.
    async fn delete_reminder(&self, id: &str) -> Result<(), MnemoError>;
}
