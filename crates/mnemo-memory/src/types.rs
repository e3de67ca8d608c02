// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory document types for the embedding index.

use mnemo_core::Scope;

/// Where a document came from.
///
/// Documents are ephemeral: derived from the store or the shared narrative
/// file on every rebuild, never persisted themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentSource {
    /// Derived 1:1 from a stored memory record.
    Store,
    /// The shared narrative text file.
    SharedText,
    /// Synthetic seed document for an otherwise empty corpus.
    Placeholder,
}

/// One indexable unit of memory text.
#[derive(Debug, Clone)]
pub struct Document {
    pub content: String,
    pub scope: Scope,
    pub source: DocumentSource,
}

impl Document {
    pub fn new(content: impl Into<String>, scope: Scope, source: DocumentSource) -> Self {
        Self {
            content: content.into(),
            scope,
            source,
        }
    }
}
