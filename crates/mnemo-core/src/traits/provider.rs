// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapter trait for LLM integrations (Gemini, etc.).

use async_trait::async_trait;

use crate::error::MnemoError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{CompletionRequest, CompletionResponse};

/// Adapter for LLM provider integrations.
///
/// Provider adapters handle communication with language model APIs.
/// Mnemo only needs single-shot synchronous completion; answer generation,
/// reminder extraction, and any future structured-output call all go
/// through [`complete`](ProviderAdapter::complete).
#[async_trait]
pub trait ProviderAdapter: PluginAdapter {
    /// Sends a completion request and returns the full response.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, MnemoError>;
}
