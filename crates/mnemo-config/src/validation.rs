// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as non-empty paths and positive retrieval limits.

use crate::diagnostic::ConfigError;
use crate::model::MnemoConfig;

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &MnemoConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.agent.name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "agent.name must not be empty".to_string(),
        });
    }

    if !VALID_LOG_LEVELS.contains(&config.agent.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.log_level must be one of trace/debug/info/warn/error, got `{}`",
                config.agent.log_level
            ),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.memory.model_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "memory.model_path must not be empty".to_string(),
        });
    }

    // A retrieval side with k=0 is a misconfiguration, not a scoping policy:
    // it silently disables that half of the scoped search.
    if config.retrieval.user_top_k == 0 {
        errors.push(ConfigError::Validation {
            message: "retrieval.user_top_k must be at least 1".to_string(),
        });
    }

    if config.retrieval.global_top_k == 0 {
        errors.push(ConfigError::Validation {
            message: "retrieval.global_top_k must be at least 1".to_string(),
        });
    }

    if !(0.0..=2.0).contains(&config.gemini.temperature) {
        errors.push(ConfigError::Validation {
            message: format!(
                "gemini.temperature must be between 0.0 and 2.0, got {}",
                config.gemini.temperature
            ),
        });
    }

    if config.gemini.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "gemini.timeout_secs must be at least 1".to_string(),
        });
    }

    if config.reminder.default_offset_minutes < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "reminder.default_offset_minutes must be positive, got {}",
                config.reminder.default_offset_minutes
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = MnemoConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_database_path_fails_validation() {
        let mut config = MnemoConfig::default();
        config.storage.database_path = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("database_path"))));
    }

    #[test]
    fn zero_top_k_fails_validation() {
        let mut config = MnemoConfig::default();
        config.retrieval.user_top_k = 0;
        config.retrieval.global_top_k = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn invalid_log_level_fails_validation() {
        let mut config = MnemoConfig::default();
        config.agent.log_level = "verbose".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("log_level"))));
    }

    #[test]
    fn out_of_range_temperature_fails_validation() {
        let mut config = MnemoConfig::default();
        config.gemini.temperature = 3.5;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("temperature"))));
    }

    #[test]
    fn negative_reminder_offset_fails_validation() {
        let mut config = MnemoConfig::default();
        config.reminder.default_offset_minutes = -10;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("default_offset_minutes"))));
    }

    #[test]
    fn valid_custom_config_passes() {
        let mut config = MnemoConfig::default();
        config.storage.database_path = "/tmp/test.db".to_string();
        config.retrieval.user_top_k = 5;
        config.retrieval.global_top_k = 1;
        config.gemini.temperature = 0.0;
        assert!(validate_config(&config).is_ok());
    }
}
