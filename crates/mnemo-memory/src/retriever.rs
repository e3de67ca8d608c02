// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scope-aware retrieval over the embedding index.

use std::sync::Arc;

use mnemo_core::types::EmbeddingInput;
use mnemo_core::{EmbeddingAdapter, MnemoError, Scope};
use tracing::warn;

use crate::index::EmbeddingIndex;

/// Per-query retrieval limits, taken from the `[retrieval]` config section.
#[derive(Debug, Clone, Copy)]
pub struct RetrievalLimits {
    pub user_top_k: usize,
    pub global_top_k: usize,
}

impl Default for RetrievalLimits {
    fn default() -> Self {
        Self {
            user_top_k: 3,
            global_top_k: 2,
        }
    }
}

/// Retrieves question context from the index, respecting memory scopes.
///
/// Bound to one index snapshot; a rebuild produces a fresh retriever as
/// part of the new pipeline.
pub struct ScopedRetriever {
    index: Arc<EmbeddingIndex>,
    embedder: Arc<dyn EmbeddingAdapter>,
    limits: RetrievalLimits,
}

impl ScopedRetriever {
    pub fn new(
        index: Arc<EmbeddingIndex>,
        embedder: Arc<dyn EmbeddingAdapter>,
        limits: RetrievalLimits,
    ) -> Self {
        Self {
            index,
            embedder,
            limits,
        }
    }

    /// Build the context block for a question.
    ///
    /// User-scoped hits come first, then global hits, each group keeping
    /// its own similarity ranking; contents are joined with newlines.
    /// Any embedding or search failure is logged and yields an empty
    /// context so the chat turn proceeds without memory.
    pub async fn context_for(&self, question: &str, user_id: Option<&str>) -> String {
        match self.try_context_for(question, user_id).await {
            Ok(context) => context,
            Err(e) => {
                warn!(error = %e, "retrieval failed, answering without context");
                String::new()
            }
        }
    }

    async fn try_context_for(
        &self,
        question: &str,
        user_id: Option<&str>,
    ) -> Result<String, MnemoError> {
        let output = self
            .embedder
            .embed(EmbeddingInput {
                texts: vec![question.to_string()],
            })
            .await?;
        let query = output
            .embeddings
            .into_iter()
            .next()
            .ok_or_else(|| MnemoError::Embedding("embedder returned no query vector".into()))?;

        let mut contents: Vec<&str> = Vec::new();

        if let Some(user_id) = user_id {
            let scope = Scope::User(user_id.to_string());
            for doc in self.index.search(&query, &scope, self.limits.user_top_k) {
                contents.push(&doc.content);
            }
        }
        for doc in self
            .index
            .search(&query, &Scope::Global, self.limits.global_top_k)
        {
            contents.push(&doc.content);
        }

        Ok(contents.join("\n"))
    }
}
