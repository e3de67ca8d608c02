// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Immutable in-memory embedding index with scoped similarity search.

use std::sync::Arc;

use mnemo_core::types::EmbeddingInput;
use mnemo_core::{EmbeddingAdapter, MnemoError, Scope};
use tracing::debug;

use crate::types::Document;

/// An immutable snapshot of the embedded memory corpus.
///
/// Built in one shot from a document set; replaced wholesale on rebuild,
/// never mutated. Any single embedding failure fails the whole build so a
/// partial index is never observable.
pub struct EmbeddingIndex {
    entries: Vec<(Document, Vec<f32>)>,
}

impl EmbeddingIndex {
    /// Embed every document and assemble the index.
    pub async fn build(
        documents: Vec<Document>,
        embedder: &Arc<dyn EmbeddingAdapter>,
    ) -> Result<Self, MnemoError> {
        let texts: Vec<String> = documents.iter().map(|d| d.content.clone()).collect();
        let output = embedder.embed(EmbeddingInput { texts }).await?;

        if output.embeddings.len() != documents.len() {
            return Err(MnemoError::Embedding(format!(
                "embedder returned {} vectors for {} documents",
                output.embeddings.len(),
                documents.len()
            )));
        }

        debug!(
            documents = documents.len(),
            dimensions = output.dimensions,
            "embedding index built"
        );

        Ok(Self {
            entries: documents.into_iter().zip(output.embeddings).collect(),
        })
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Top-k documents of exactly the given scope, ranked by cosine
    /// similarity to the query vector.
    pub fn search(&self, query: &[f32], scope: &Scope, k: usize) -> Vec<&Document> {
        let mut scored: Vec<(f32, &Document)> = self
            .entries
            .iter()
            .filter(|(doc, _)| doc.scope == *scope)
            .map(|(doc, vec)| (cosine_similarity(query, vec), doc))
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.into_iter().take(k).map(|(_, doc)| doc).collect()
    }
}

/// Cosine similarity of two vectors. Zero-magnitude input yields 0.0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a <= f32::EPSILON || norm_b <= f32::EPSILON {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
