// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./mnemo.toml` > `~/.config/mnemo/mnemo.toml` >
//! `/etc/mnemo/mnemo.toml` with environment variable overrides via the
//! `MNEMO_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::MnemoConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/mnemo/mnemo.toml` (system-wide)
/// 3. `~/.config/mnemo/mnemo.toml` (user XDG config)
/// 4. `./mnemo.toml` (local directory)
/// 5. `MNEMO_*` environment variables
pub fn load_config() -> Result<MnemoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MnemoConfig::default()))
        .merge(Toml::file("/etc/mnemo/mnemo.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("mnemo/mnemo.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("mnemo.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<MnemoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MnemoConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<MnemoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MnemoConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `MNEMO_STORAGE_DATABASE_PATH` must map
/// to `storage.database_path`, not `storage.database.path`.
fn env_provider() -> Env {
    Env::prefixed("MNEMO_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("gemini_", "gemini.", 1)
            .replacen("memory_", "memory.", 1)
            .replacen("retrieval_", "retrieval.", 1)
            .replacen("reminder_", "reminder.", 1);
        mapped.into()
    })
}
