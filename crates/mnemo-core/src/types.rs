// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Mnemo workspace.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Ownership tag distinguishing a memory or document as belonging to one
/// user or to the shared global corpus.
///
/// Stored in SQLite as a nullable `user_id` column: `NULL` means global.
/// Retrieval for user U must only ever see `User(U)` or `Global` content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    /// Visible to every user (shared narrative, system facts).
    Global,
    /// Private to a single user.
    User(String),
}

impl Scope {
    /// The user id this scope is private to, or `None` for global.
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Scope::Global => None,
            Scope::User(id) => Some(id),
        }
    }

    /// Build a scope from a nullable user id as stored in SQLite.
    pub fn from_user_id(user_id: Option<String>) -> Self {
        match user_id {
            Some(id) => Scope::User(id),
            None => Scope::Global,
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::Global => write!(f, "global"),
            Scope::User(id) => write!(f, "user:{id}"),
        }
    }
}

/// A single persisted memory fact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryRecord {
    /// Unique identifier.
    pub id: String,
    /// Owner scope (one user or global).
    pub scope: Scope,
    /// The fact content, stored verbatim.
    pub content: String,
    /// ISO 8601 creation timestamp.
    pub created_at: String,
}

/// A chat session grouping a conversation's turns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: String,
    pub user_id: String,
    pub title: String,
    /// ISO 8601 creation timestamp.
    pub created_at: String,
}

/// One message within a chat session. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub session_id: String,
    pub user_id: String,
    /// Either "user" or "assistant".
    pub role: String,
    pub content: String,
    /// ISO 8601 creation timestamp.
    pub created_at: String,
}

/// A scheduled reminder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reminder {
    pub id: String,
    pub user_id: String,
    pub content: String,
    /// Due timestamp in naive UTC.
    pub due_date: NaiveDateTime,
    pub completed: bool,
    /// ISO 8601 creation timestamp.
    pub created_at: String,
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of adapter behind a [`crate::PluginAdapter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdapterType {
    Provider,
    Storage,
    Embedding,
}

impl std::fmt::Display for AdapterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdapterType::Provider => write!(f, "provider"),
            AdapterType::Storage => write!(f, "storage"),
            AdapterType::Embedding => write!(f, "embedding"),
        }
    }
}

/// Input for an embedding adapter: a batch of texts.
#[derive(Debug, Clone)]
pub struct EmbeddingInput {
    pub texts: Vec<String>,
}

/// Output from an embedding adapter: one vector per input text.
#[derive(Debug, Clone)]
pub struct EmbeddingOutput {
    pub embeddings: Vec<Vec<f32>>,
    pub dimensions: usize,
}

/// A single-shot completion request to an LLM provider.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// The fully rendered prompt text.
    pub prompt: String,
    /// Sampling temperature. `None` uses the provider's configured default.
    pub temperature: Option<f32>,
    /// Maximum tokens to generate. `None` uses the provider's configured default.
    pub max_output_tokens: Option<u32>,
}

/// The text produced by a completion request.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub text: String,
}
