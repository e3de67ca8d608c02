// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! ONNX embedding adapter for local inference using all-MiniLM-L6-v2.
//!
//! Produces 384-dimensional embeddings on CPU with zero external API calls.
//! [`SharedEmbedder`] wraps lazy one-time initialization so concurrent
//! first use never loads the model twice.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ndarray::Array2;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::TensorRef;
use tokio::sync::OnceCell;
use tracing::info;

use mnemo_core::error::MnemoError;
use mnemo_core::traits::adapter::PluginAdapter;
use mnemo_core::traits::EmbeddingAdapter;
use mnemo_core::types::{AdapterType, EmbeddingInput, EmbeddingOutput, HealthStatus};

/// Embedding dimensions for all-MiniLM-L6-v2.
pub const EMBEDDING_DIM: usize = 384;

/// ONNX-based embedding adapter using all-MiniLM-L6-v2.
///
/// Loads the ONNX model and tokenizer from disk. Inference runs on CPU
/// with a single intra-op thread.
pub struct OnnxEmbedder {
    /// ONNX Runtime session (not Send, wrapped in Mutex for safety).
    session: Mutex<Session>,
    /// HuggingFace tokenizer.
    tokenizer: tokenizers::Tokenizer,
}

// Safety: Session is accessed through Mutex which provides synchronization.
// The tokenizer is thread-safe for encoding operations.
unsafe impl Send for OnnxEmbedder {}
unsafe impl Sync for OnnxEmbedder {}

impl OnnxEmbedder {
    /// Creates a new ONNX embedder from model files on disk.
    ///
    /// Expects `tokenizer.json` next to the model file.
    pub fn new(model_path: &Path) -> Result<Self, MnemoError> {
        let model_dir = model_path
            .parent()
            .ok_or_else(|| MnemoError::Embedding("invalid model path".to_string()))?;

        let tokenizer_path = model_dir.join("tokenizer.json");
        let tokenizer = tokenizers::Tokenizer::from_file(&tokenizer_path).map_err(|e| {
            MnemoError::Embedding(format!(
                "failed to load tokenizer from {}: {e}",
                tokenizer_path.display()
            ))
        })?;

        let session = Session::builder()
            .map_err(|e| MnemoError::Embedding(format!("failed to create ONNX session builder: {e}")))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| MnemoError::Embedding(format!("failed to set optimization level: {e}")))?
            .with_intra_threads(1)
            .map_err(|e| MnemoError::Embedding(format!("failed to set thread count: {e}")))?
            .commit_from_file(model_path)
            .map_err(|e| {
                MnemoError::Embedding(format!(
                    "failed to load ONNX model from {}: {e}",
                    model_path.display()
                ))
            })?;

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
        })
    }

    /// Embed a single text string, returning a 384-dim f32 vector.
    pub fn embed_text(&self, text: &str) -> Result<Vec<f32>, MnemoError> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| MnemoError::Embedding(format!("tokenization failed: {e}")))?;

        let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
        let attention_mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .map(|&m| m as i64)
            .collect();
        let token_type_ids: Vec<i64> = encoding
            .get_type_ids()
            .iter()
            .map(|&t| t as i64)
            .collect();

        let seq_len = input_ids.len();

        let input_ids_array = Array2::from_shape_vec((1, seq_len), input_ids)
            .map_err(|e| MnemoError::Embedding(format!("failed to create input_ids tensor: {e}")))?;
        let attention_mask_array = Array2::from_shape_vec((1, seq_len), attention_mask.clone())
            .map_err(|e| {
                MnemoError::Embedding(format!("failed to create attention_mask tensor: {e}"))
            })?;
        let token_type_ids_array = Array2::from_shape_vec((1, seq_len), token_type_ids)
            .map_err(|e| {
                MnemoError::Embedding(format!("failed to create token_type_ids tensor: {e}"))
            })?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| MnemoError::Embedding(format!("failed to lock ONNX session: {e}")))?;

        let input_ids_tensor = TensorRef::from_array_view(&input_ids_array)
            .map_err(|e| MnemoError::Embedding(format!("failed to create input_ids TensorRef: {e}")))?;
        let attention_mask_tensor = TensorRef::from_array_view(&attention_mask_array)
            .map_err(|e| {
                MnemoError::Embedding(format!("failed to create attention_mask TensorRef: {e}"))
            })?;
        let token_type_ids_tensor = TensorRef::from_array_view(&token_type_ids_array)
            .map_err(|e| {
                MnemoError::Embedding(format!("failed to create token_type_ids TensorRef: {e}"))
            })?;

        let outputs = session
            .run(ort::inputs![
                "input_ids" => input_ids_tensor,
                "attention_mask" => attention_mask_tensor,
                "token_type_ids" => token_type_ids_tensor
            ])
            .map_err(|e| MnemoError::Embedding(format!("ONNX inference failed: {e}")))?;

        // Output shape: [1, seq_len, 384]
        let (shape, data) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| MnemoError::Embedding(format!("failed to extract output tensor: {e}")))?;

        let hidden_size = shape[shape.len() - 1] as usize;
        let pooled = mean_pool_with_attention(data, &attention_mask, seq_len, hidden_size);

        Ok(l2_normalize(&pooled))
    }
}

/// Apply attention-masked mean pooling over token embeddings.
fn mean_pool_with_attention(
    embeddings: &[f32],
    attention_mask: &[i64],
    seq_len: usize,
    hidden_size: usize,
) -> Vec<f32> {
    let mut sum = vec![0.0f32; hidden_size];
    let mut count = 0.0f32;

    for i in 0..seq_len {
        if attention_mask[i] > 0 {
            for j in 0..hidden_size {
                sum[j] += embeddings[i * hidden_size + j];
            }
            count += 1.0;
        }
    }

    if count > 0.0 {
        for val in &mut sum {
            *val /= count;
        }
    }

    sum
}

/// L2-normalize a vector.
fn l2_normalize(vec: &[f32]) -> Vec<f32> {
    let norm: f32 = vec.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > f32::EPSILON {
        vec.iter().map(|v| v / norm).collect()
    } else {
        vec.to_vec()
    }
}

#[async_trait]
impl PluginAdapter for OnnxEmbedder {
    fn name(&self) -> &str {
        "onnx-embedder"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Embedding
    }

    async fn health_check(&self) -> Result<HealthStatus, MnemoError> {
        match self.session.lock() {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(format!(
                "session lock poisoned: {e}"
            ))),
        }
    }

    async fn shutdown(&self) -> Result<(), MnemoError> {
        Ok(())
    }
}

#[async_trait]
impl EmbeddingAdapter for OnnxEmbedder {
    async fn embed(&self, input: EmbeddingInput) -> Result<EmbeddingOutput, MnemoError> {
        let mut embeddings = Vec::with_capacity(input.texts.len());

        for text in &input.texts {
            let vec = self.embed_text(text)?;
            embeddings.push(vec);
        }

        Ok(EmbeddingOutput {
            embeddings,
            dimensions: EMBEDDING_DIM,
        })
    }
}

/// Lazily initialized process-wide embedder handle.
///
/// The ONNX model load is expensive; this guard makes sure it happens at
/// most once per process even when the first rebuild and the first chat
/// turn race. Model loading runs on a blocking thread so the runtime is
/// not stalled.
#[derive(Clone)]
pub struct SharedEmbedder {
    model_path: PathBuf,
    cell: Arc<OnceCell<Arc<OnnxEmbedder>>>,
}

impl SharedEmbedder {
    pub fn new(model_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            cell: Arc::new(OnceCell::new()),
        }
    }

    /// Get the embedder, loading the model on first use.
    pub async fn get(&self) -> Result<Arc<OnnxEmbedder>, MnemoError> {
        let path = self.model_path.clone();
        self.cell
            .get_or_try_init(|| async move {
                info!(path = %path.display(), "loading embedding model");
                let embedder = tokio::task::spawn_blocking(move || OnnxEmbedder::new(&path))
                    .await
                    .map_err(|e| {
                        MnemoError::Embedding(format!("embedder initialization task failed: {e}"))
                    })??;
                Ok(Arc::new(embedder))
            })
            .await
            .cloned()
    }
}

#[async_trait]
impl PluginAdapter for SharedEmbedder {
    fn name(&self) -> &str {
        "onnx-embedder"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Embedding
    }

    async fn health_check(&self) -> Result<HealthStatus, MnemoError> {
        match self.cell.get() {
            Some(embedder) => embedder.health_check().await,
            // Not loaded yet is a valid state; the model loads on first use.
            None => Ok(HealthStatus::Healthy),
        }
    }

    async fn shutdown(&self) -> Result<(), MnemoError> {
        Ok(())
    }
}

#[async_trait]
impl EmbeddingAdapter for SharedEmbedder {
    async fn embed(&self, input: EmbeddingInput) -> Result<EmbeddingOutput, MnemoError> {
        self.get().await?.embed(input).await
    }
}
