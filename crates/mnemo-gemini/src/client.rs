// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Gemini generateContent API.
//!
//! Provides [`GeminiClient`] which handles request construction,
//! authentication, and transient error retry.

use std::time::Duration;

use mnemo_core::MnemoError;
use tracing::{debug, warn};

use crate::types::{ApiErrorResponse, GenerateContentRequest, GenerateContentResponse};

/// Base URL for the Gemini API.
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// HTTP client for Gemini API communication.
///
/// Manages authentication, connection pooling, and retry logic for
/// transient errors (429, 500, 503).
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    timeout: Duration,
    max_retries: u32,
    base_url: String,
}

impl GeminiClient {
    /// Creates a new Gemini API client.
    ///
    /// # Arguments
    /// * `api_key` - Gemini API key, passed as the `key` query parameter
    /// * `model` - Model identifier (e.g., "gemini-2.5-flash")
    /// * `timeout` - Per-request HTTP timeout
    pub fn new(api_key: String, model: String, timeout: Duration) -> Result<Self, MnemoError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MnemoError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            api_key,
            model,
            timeout,
            max_retries: 1,
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Returns the model identifier this client targets.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    /// Sends a generateContent request and returns the parsed response.
    ///
    /// On transient errors (429, 500, 503), retries once after a 1-second delay.
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, MnemoError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying generation request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .post(&url)
                .json(request)
                .send()
                .await
                .map_err(|e| {
                    if e.is_timeout() {
                        MnemoError::Timeout {
                            duration: self.timeout,
                        }
                    } else {
                        MnemoError::Provider {
                            message: format!("HTTP request failed: {e}"),
                            source: Some(Box::new(e)),
                        }
                    }
                })?;

            let status = response.status();
            debug!(status = %status, attempt, "generation response received");

            if status.is_success() {
                let body = response.text().await.map_err(|e| MnemoError::Provider {
                    message: format!("failed to read response body: {e}"),
                    source: Some(Box::new(e)),
                })?;
                let parsed: GenerateContentResponse =
                    serde_json::from_str(&body).map_err(|e| MnemoError::Provider {
                        message: format!("failed to parse API response: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                return Ok(parsed);
            }

            if is_transient_error(status) && attempt < self.max_retries {
                let body = response.text().await.unwrap_or_default();
                warn!(status = %status, body = %body, "transient error, will retry");
                last_error = Some(MnemoError::Provider {
                    message: format!("API returned {status}: {body}"),
                    source: None,
                });
                continue;
            }

            // Non-transient error or exhausted retries.
            let body = response.text().await.unwrap_or_default();
            let error_msg = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&body) {
                format!(
                    "Gemini API error ({} {}): {}",
                    api_err.error.code, api_err.error.status, api_err.error.message
                )
            } else {
                format!("API returned {status}: {body}")
            };
            return Err(MnemoError::Provider {
                message: error_msg,
                source: None,
            });
        }

        Err(last_error.unwrap_or_else(|| MnemoError::Provider {
            message: "generation request failed after retries".into(),
            source: None,
        }))
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Content, GenerationConfig, Part};
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> GeminiClient {
        GeminiClient::new(
            "test-api-key".into(),
            "gemini-2.5-flash".into(),
            Duration::from_secs(10),
        )
        .unwrap()
        .with_base_url(base_url.to_string())
    }

    fn test_request() -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user".into(),
                parts: vec![Part {
                    text: "Hello".into(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.3,
                max_output_tokens: 1024,
            },
        }
    }

    fn success_body(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": text}]},
                "finishReason": "STOP"
            }]
        })
    }

    #[tokio::test]
    async fn generate_content_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-flash:generateContent"))
            .and(query_param("key", "test-api-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body("Hi there!")))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.generate_content(&test_request()).await.unwrap();
        assert_eq!(result.first_candidate_text().as_deref(), Some("Hi there!"));
    }

    #[tokio::test]
    async fn generate_content_sends_generation_config() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-flash:generateContent"))
            .and(body_partial_json(serde_json::json!({
                "generationConfig": {"temperature": 0.3, "maxOutputTokens": 1024}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body("ok")))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.generate_content(&test_request()).await;
        assert!(result.is_ok(), "generation config should match: {result:?}");
    }

    #[tokio::test]
    async fn generate_content_retries_on_429() {
        let server = MockServer::start().await;

        let error_body = serde_json::json!({
            "error": {"code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED"}
        });

        // First request returns 429, second returns 200.
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(429).set_body_json(&error_body))
            .up_to_n_times(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body("After retry")))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.generate_content(&test_request()).await.unwrap();
        assert_eq!(
            result.first_candidate_text().as_deref(),
            Some("After retry")
        );
    }

    #[tokio::test]
    async fn generate_content_fails_on_400() {
        let server = MockServer::start().await;

        let error_body = serde_json::json!({
            "error": {"code": 400, "message": "Invalid model", "status": "INVALID_ARGUMENT"}
        });

        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(400).set_body_json(&error_body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.generate_content(&test_request()).await;
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("INVALID_ARGUMENT"), "got: {err}");
    }

    #[tokio::test]
    async fn generate_content_exhausts_retries_on_503() {
        let server = MockServer::start().await;

        let error_body = serde_json::json!({
            "error": {"code": 503, "message": "Service overloaded", "status": "UNAVAILABLE"}
        });

        // Both attempts return 503.
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(503).set_body_json(&error_body))
            .expect(2)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.generate_content(&test_request()).await;
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("UNAVAILABLE"), "got: {err}");
    }
}
