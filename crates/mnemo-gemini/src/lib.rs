// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Gemini provider adapter for Mnemo.
//!
//! This crate implements [`ProviderAdapter`] for the Gemini generateContent
//! API, providing single-shot completion for answer generation and
//! structured extraction.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use mnemo_config::model::GeminiConfig;
use mnemo_core::error::MnemoError;
use mnemo_core::traits::{PluginAdapter, ProviderAdapter};
use mnemo_core::types::{AdapterType, CompletionRequest, CompletionResponse, HealthStatus};
use tracing::{debug, info};

use crate::client::GeminiClient;
use crate::types::{Content, GenerateContentRequest, GenerationConfig, Part};

/// Gemini provider implementing [`ProviderAdapter`].
///
/// API key resolution order: config -> `GEMINI_API_KEY` env var -> error.
pub struct GeminiProvider {
    client: GeminiClient,
    default_temperature: f32,
    default_max_output_tokens: u32,
}

impl GeminiProvider {
    /// Creates a new Gemini provider from the given configuration.
    ///
    /// # API Key Resolution
    /// 1. `config.gemini.api_key` if set
    /// 2. `GEMINI_API_KEY` environment variable
    /// 3. Returns error if neither is available
    pub fn new(config: &GeminiConfig) -> Result<Self, MnemoError> {
        let api_key = resolve_api_key(&config.api_key)?;
        let client = GeminiClient::new(
            api_key,
            config.model.clone(),
            Duration::from_secs(config.timeout_secs),
        )?;

        info!(model = config.model, "Gemini provider initialized");

        Ok(Self {
            client,
            default_temperature: config.temperature,
            default_max_output_tokens: config.max_output_tokens,
        })
    }

    /// Creates a provider with an existing client (for testing).
    #[cfg(test)]
    fn with_client(client: GeminiClient) -> Self {
        Self {
            client,
            default_temperature: 0.3,
            default_max_output_tokens: 1024,
        }
    }

    /// Converts a [`CompletionRequest`] to a Gemini [`GenerateContentRequest`].
    fn to_api_request(&self, request: &CompletionRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user".into(),
                parts: vec![Part {
                    text: request.prompt.clone(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature.unwrap_or(self.default_temperature),
                max_output_tokens: request
                    .max_output_tokens
                    .unwrap_or(self.default_max_output_tokens),
            },
        }
    }
}

#[async_trait]
impl PluginAdapter for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, MnemoError> {
        // Avoid consuming quota on health checks; the client is
        // constructable, so report healthy.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), MnemoError> {
        debug!("Gemini provider shutting down");
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for GeminiProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, MnemoError> {
        let api_request = self.to_api_request(&request);
        let response = self.client.generate_content(&api_request).await?;

        let text = response
            .first_candidate_text()
            .ok_or_else(|| MnemoError::Provider {
                message: "Gemini response contained no candidates".into(),
                source: None,
            })?;

        Ok(CompletionResponse { text })
    }
}

/// Resolves the API key from config or environment.
fn resolve_api_key(config_key: &Option<String>) -> Result<String, MnemoError> {
    if let Some(key) = config_key {
        if !key.is_empty() {
            return Ok(key.clone());
        }
    }

    std::env::var("GEMINI_API_KEY").map_err(|_| {
        MnemoError::Config(
            "Gemini API key not found. Set gemini.api_key in config or GEMINI_API_KEY environment variable.".into(),
        )
    })
}
