// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat orchestration for Mnemo.
//!
//! Ties together the memory index, the intent classifiers, and the LLM
//! provider: [`orchestrator::ChatOrchestrator`] drives each turn against
//! an atomically swapped [`pipeline::Pipeline`] snapshot, with rebuilds
//! handled off-turn by the [`lifecycle`] worker.

pub mod learning;
pub mod lifecycle;
pub mod orchestrator;
pub mod pipeline;
pub mod reminder;

#[cfg(test)]
pub(crate) mod testing;

pub use lifecycle::{spawn_rebuild_worker, PipelineBuilder, PipelineCell, RebuildHandle};
pub use orchestrator::{ChatOrchestrator, ChatReply, ChatRequest, INITIALIZING_ANSWER};
pub use pipeline::{Pipeline, FALLBACK_ANSWER};
pub use reminder::{ReminderExtractor, ReminderOutcome};
