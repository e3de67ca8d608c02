// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Mnemo personalized assistant.
//!
//! This crate provides the foundational trait definitions, error types, and
//! domain types used throughout the Mnemo workspace. The embedding, provider,
//! and storage backends all implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::MnemoError;
pub use types::{
    AdapterType, ChatSession, ChatTurn, HealthStatus, MemoryRecord, Reminder, Scope,
};

// Re-export adapter traits at crate root.
pub use traits::{EmbeddingAdapter, PluginAdapter, ProviderAdapter, StorageAdapter};
