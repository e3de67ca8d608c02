// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pipeline lifecycle: atomic snapshot cell and the coalescing rebuild
//! worker.
//!
//! Readers take a [`Pipeline`] snapshot at turn start and never block on a
//! rebuild. Rebuild requests flow through a capacity-1 channel: a request
//! arriving while one is already pending coalesces into it instead of
//! queueing, so a burst of learned memories costs at most one extra
//! rebuild.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use mnemo_core::{EmbeddingAdapter, MnemoError, ProviderAdapter, StorageAdapter};
use mnemo_memory::{load_documents, EmbeddingIndex, RetrievalLimits, ScopedRetriever};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::pipeline::Pipeline;

/// Process-wide holder of the live pipeline.
///
/// `None` until the first successful rebuild; swapped atomically so a
/// reader sees fully-old or fully-new, never a half-built pipeline.
#[derive(Default)]
pub struct PipelineCell {
    inner: ArcSwapOption<Pipeline>,
}

impl PipelineCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current pipeline snapshot, if one has been built.
    pub fn snapshot(&self) -> Option<Arc<Pipeline>> {
        self.inner.load_full()
    }

    /// Atomically replace the live pipeline.
    pub fn store(&self, pipeline: Arc<Pipeline>) {
        self.inner.store(Some(pipeline));
    }
}

/// Everything needed to compose a fresh pipeline from current state.
pub struct PipelineBuilder {
    pub storage: Arc<dyn StorageAdapter>,
    pub embedder: Arc<dyn EmbeddingAdapter>,
    pub provider: Arc<dyn ProviderAdapter>,
    pub persona: String,
    pub limits: RetrievalLimits,
    pub shared_story_path: Option<String>,
}

impl PipelineBuilder {
    /// Reload documents, rebuild the index, and compose a pipeline.
    pub async fn build(&self) -> Result<Pipeline, MnemoError> {
        let documents =
            load_documents(&self.storage, self.shared_story_path.as_deref()).await?;
        let count = documents.len();
        let index = EmbeddingIndex::build(documents, &self.embedder).await?;
        let retriever =
            ScopedRetriever::new(Arc::new(index), self.embedder.clone(), self.limits);

        info!(documents = count, "pipeline rebuilt");
        Ok(Pipeline::new(
            retriever,
            self.provider.clone(),
            self.persona.clone(),
        ))
    }
}

/// Handle for requesting asynchronous rebuilds.
#[derive(Clone)]
pub struct RebuildHandle {
    tx: mpsc::Sender<()>,
}

impl RebuildHandle {
    /// Request a rebuild. Fire-and-forget: if one is already pending this
    /// request coalesces into it; if the worker is gone the request is
    /// dropped with a warning.
    pub fn request(&self) {
        match self.tx.try_send(()) {
            Ok(()) => debug!("rebuild requested"),
            Err(mpsc::error::TrySendError::Full(())) => {
                debug!("rebuild already pending, coalesced");
            }
            Err(mpsc::error::TrySendError::Closed(())) => {
                warn!("rebuild worker is gone, request dropped");
            }
        }
    }
}

/// Spawn the dedicated rebuild worker task.
///
/// The worker serializes rebuilds: it drains one request at a time, builds
/// a fresh pipeline, and stores it in the cell. A failed rebuild leaves
/// the previous pipeline live.
pub fn spawn_rebuild_worker(
    builder: PipelineBuilder,
    cell: Arc<PipelineCell>,
) -> RebuildHandle {
    let (tx, mut rx) = mpsc::channel(1);

    tokio::spawn(async move {
        while rx.recv().await.is_some() {
            match builder.build().await {
                Ok(pipeline) => cell.store(Arc::new(pipeline)),
                Err(e) => warn!(error = %e, "pipeline rebuild failed"),
            }
        }
        debug!("rebuild worker stopped");
    });

    RebuildHandle { tx }
}
