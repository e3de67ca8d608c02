// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared test doubles for the chat crate's unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mnemo_core::types::{
    AdapterType, CompletionRequest, CompletionResponse, EmbeddingInput, EmbeddingOutput,
    HealthStatus,
};
use mnemo_core::{EmbeddingAdapter, MnemoError, PluginAdapter, ProviderAdapter, Scope};
use mnemo_memory::{
    Document, DocumentSource, EmbeddingIndex, RetrievalLimits, ScopedRetriever,
};

/// Embedder that maps every text to the same unit vector. Scope filtering
/// is then the only thing retrieval tests exercise.
pub struct FlatEmbedder;

#[async_trait]
impl PluginAdapter for FlatEmbedder {
    fn name(&self) -> &str {
        "flat"
    }
    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }
    fn adapter_type(&self) -> AdapterType {
        AdapterType::Embedding
    }
    async fn health_check(&self) -> Result<HealthStatus, MnemoError> {
        Ok(HealthStatus::Healthy)
    }
    async fn shutdown(&self) -> Result<(), MnemoError> {
        Ok(())
    }
}

#[async_trait]
impl EmbeddingAdapter for FlatEmbedder {
    async fn embed(&self, input: EmbeddingInput) -> Result<EmbeddingOutput, MnemoError> {
        Ok(EmbeddingOutput {
            embeddings: input.texts.iter().map(|_| vec![1.0, 0.0]).collect(),
            dimensions: 2,
        })
    }
}

pub fn flat_embedder() -> Arc<dyn EmbeddingAdapter> {
    Arc::new(FlatEmbedder)
}

/// Build a retriever over a fixed document set with default limits.
pub async fn retriever_with_docs(docs: Vec<(&str, Scope)>) -> ScopedRetriever {
    let documents: Vec<Document> = docs
        .into_iter()
        .map(|(content, scope)| Document::new(content, scope, DocumentSource::Store))
        .collect();
    let embedder = flat_embedder();
    let index = Arc::new(EmbeddingIndex::build(documents, &embedder).await.unwrap());
    ScopedRetriever::new(index, embedder, RetrievalLimits::default())
}

/// Provider double with scripted responses and prompt capture.
pub struct ScriptedProvider {
    /// Responses returned in order; the last one repeats.
    responses: Vec<Result<String, ()>>,
    calls: Arc<Mutex<Vec<String>>>,
    call_index: Mutex<usize>,
}

#[async_trait]
impl PluginAdapter for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }
    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }
    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }
    async fn health_check(&self) -> Result<HealthStatus, MnemoError> {
        Ok(HealthStatus::Healthy)
    }
    async fn shutdown(&self) -> Result<(), MnemoError> {
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for ScriptedProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, MnemoError> {
        self.calls.lock().unwrap().push(request.prompt);
        let mut index = self.call_index.lock().unwrap();
        let response = self
            .responses
            .get(*index)
            .or_else(|| self.responses.last())
            .cloned()
            .unwrap_or(Err(()));
        *index += 1;
        match response {
            Ok(text) => Ok(CompletionResponse { text }),
            Err(()) => Err(MnemoError::Provider {
                message: "scripted failure".into(),
                source: None,
            }),
        }
    }
}

/// Provider that always answers with `text`, capturing each prompt.
pub fn recording_provider(
    text: &str,
) -> (Arc<dyn ProviderAdapter>, Arc<Mutex<Vec<String>>>) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let provider = Arc::new(ScriptedProvider {
        responses: vec![Ok(text.to_string())],
        calls: calls.clone(),
        call_index: Mutex::new(0),
    });
    (provider, calls)
}

/// Provider whose every call fails.
pub fn failing_provider() -> Arc<dyn ProviderAdapter> {
    Arc::new(ScriptedProvider {
        responses: vec![Err(())],
        calls: Arc::new(Mutex::new(Vec::new())),
        call_index: Mutex::new(0),
    })
}

/// Provider returning the given responses in sequence (last repeats).
pub fn scripted_provider(
    responses: Vec<Result<String, ()>>,
) -> (Arc<dyn ProviderAdapter>, Arc<Mutex<Vec<String>>>) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let provider = Arc::new(ScriptedProvider {
        responses,
        calls: calls.clone(),
        call_index: Mutex::new(0),
    });
    (provider, calls)
}
