// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence for the Mnemo assistant.
//!
//! Stores chat sessions, per-session history, memory facts, and reminders.
//! All access goes through [`SqliteStorage`], which implements the
//! `StorageAdapter` trait from `mnemo-core`.
//!
//! Memory ownership is a nullable `user_id` column: `NULL` rows are global
//! and visible to every user, everything else is private to one user.

pub mod adapter;
pub mod database;
pub mod queries;

pub use adapter::SqliteStorage;
pub use database::Database;
