// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Diagnostic error types for configuration loading.
//!
//! Wraps figment parse errors and semantic validation failures in miette
//! diagnostics so startup failures render with helpful context.

use miette::Diagnostic;
use thiserror::Error;

/// A configuration error suitable for diagnostic rendering.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// TOML parse or deserialization failure from figment.
    #[error("invalid configuration: {message}")]
    #[diagnostic(code(mnemo::config::parse), help("{help}"))]
    Parse { message: String, help: String },

    /// Semantic validation failure after successful deserialization.
    #[error("{message}")]
    #[diagnostic(code(mnemo::config::validation))]
    Validation { message: String },
}

/// Convert a figment extraction error into diagnostic config errors.
///
/// Figment reports one error per failing key; each becomes its own
/// diagnostic so the user sees every problem in one run.
pub fn figment_to_config_errors(err: figment::Error) -> Vec<ConfigError> {
    err.into_iter()
        .map(|e| {
            let help = if e.path.is_empty() {
                "check mnemo.toml syntax".to_string()
            } else {
                format!("check the `{}` key in mnemo.toml", e.path.join("."))
            };
            ConfigError::Parse {
                message: e.to_string(),
                help,
            }
        })
        .collect()
}

/// Render all collected errors to stderr via miette's fancy reporter.
pub fn render_errors(errors: &[ConfigError]) {
    for error in errors {
        let report = miette::Report::msg(format!("{error}"));
        eprintln!("{report:?}");
    }
    eprintln!(
        "mnemo: {} configuration error(s), refusing to start",
        errors.len()
    );
}
