// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document loading for index rebuilds.
//!
//! Reads every memory record from storage plus the optional shared
//! narrative file, and guarantees a non-empty document set.

use std::sync::Arc;

use mnemo_core::{MnemoError, Scope, StorageAdapter};
use tracing::{debug, warn};

use crate::types::{Document, DocumentSource};

/// Seed content used when the store and shared file yield nothing.
/// The index is never built over an empty document set.
pub const PLACEHOLDER_CONTENT: &str = "System initialized.";

/// Load the full document corpus for an index rebuild.
///
/// Every stored memory becomes exactly one [`Document`] with its own scope.
/// The shared narrative file, when configured and non-empty, becomes one
/// Global document. An unreadable shared file is logged and skipped rather
/// than failing the rebuild.
pub async fn load_documents(
    storage: &Arc<dyn StorageAdapter>,
    shared_story_path: Option<&str>,
) -> Result<Vec<Document>, MnemoError> {
    let records = storage.list_memories().await?;
    let mut documents: Vec<Document> = records
        .into_iter()
        .map(|record| Document::new(record.content, record.scope, DocumentSource::Store))
        .collect();

    if let Some(path) = shared_story_path {
        match tokio::fs::read_to_string(path).await {
            Ok(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    documents.push(Document::new(
                        trimmed,
                        Scope::Global,
                        DocumentSource::SharedText,
                    ));
                }
            }
            Err(e) => {
                warn!(path, error = %e, "failed to read shared story file, skipping");
            }
        }
    }

    if documents.is_empty() {
        documents.push(Document::new(
            PLACEHOLDER_CONTENT,
            Scope::Global,
            DocumentSource::Placeholder,
        ));
    }

    debug!(count = documents.len(), "loaded document corpus");
    Ok(documents)
}
