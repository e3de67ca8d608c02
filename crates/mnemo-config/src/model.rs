// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Mnemo assistant.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup.

use serde::{Deserialize, Serialize};

/// Top-level Mnemo configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MnemoConfig {
    /// Assistant identity and persona settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Google Gemini API settings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Memory corpus and embedding model settings.
    #[serde(default)]
    pub memory: MemoryConfig,

    /// Retrieval scoping policy.
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Reminder extraction policy.
    #[serde(default)]
    pub reminder: ReminderConfig,
}

/// Assistant identity and behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the assistant.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Persona line injected into the answer prompt.
    #[serde(default = "default_persona")]
    pub persona: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            persona: default_persona(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "mnemo".to_string()
}

fn default_persona() -> String {
    "You are a personalized AI assistant.".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    "mnemo.db".to_string()
}

/// Google Gemini API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// Gemini API key. `None` requires the GEMINI_API_KEY environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model identifier for answer generation and reminder extraction.
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature for answer generation.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate per response.
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Per-request HTTP timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_output_tokens() -> u32 {
    1024
}

fn default_timeout_secs() -> u64 {
    60
}

/// Memory corpus and embedding model configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MemoryConfig {
    /// Path to the ONNX embedding model (all-MiniLM-L6-v2).
    /// `tokenizer.json` must sit next to it.
    #[serde(default = "default_model_path")]
    pub model_path: String,

    /// Optional path to a shared narrative text file indexed with global scope.
    #[serde(default)]
    pub shared_story_path: Option<String>,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            shared_story_path: None,
        }
    }
}

fn default_model_path() -> String {
    "models/all-MiniLM-L6-v2/model.onnx".to_string()
}

/// Retrieval scoping policy.
///
/// The user/global split is deliberately configurable; the defaults mirror
/// the production values (3 user-private results, 2 global results).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RetrievalConfig {
    /// Top-K results from the requesting user's private scope.
    #[serde(default = "default_user_top_k")]
    pub user_top_k: usize,

    /// Top-K results from the global scope.
    #[serde(default = "default_global_top_k")]
    pub global_top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            user_top_k: default_user_top_k(),
            global_top_k: default_global_top_k(),
        }
    }
}

fn default_user_top_k() -> usize {
    3
}

fn default_global_top_k() -> usize {
    2
}

/// Reminder extraction policy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ReminderConfig {
    /// Offset in minutes the extraction prompt suggests when the user gives
    /// no explicit time.
    #[serde(default = "default_offset_minutes")]
    pub default_offset_minutes: i64,

    /// Sampling temperature for the structured extraction call.
    #[serde(default = "default_extraction_temperature")]
    pub extraction_temperature: f32,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            default_offset_minutes: default_offset_minutes(),
            extraction_temperature: default_extraction_temperature(),
        }
    }
}

fn default_offset_minutes() -> i64 {
    60
}

fn default_extraction_temperature() -> f32 {
    0.0
}
