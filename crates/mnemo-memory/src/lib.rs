// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Memory corpus loading, local ONNX embeddings, and scoped retrieval.
//!
//! The flow on every index rebuild: [`loader::load_documents`] reads the
//! corpus, [`index::EmbeddingIndex::build`] embeds it, and a
//! [`retriever::ScopedRetriever`] answers per-user context queries over
//! the resulting immutable snapshot.

pub mod embedder;
pub mod index;
pub mod loader;
pub mod retriever;
pub mod types;

pub use embedder::{OnnxEmbedder, SharedEmbedder, EMBEDDING_DIM};
pub use index::EmbeddingIndex;
pub use loader::{load_documents, PLACEHOLDER_CONTENT};
pub use retriever::{RetrievalLimits, ScopedRetriever};
pub use types::{Document, DocumentSource};
