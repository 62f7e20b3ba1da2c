// SPDX-FileCopyrightText: 2026 Aegis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::{AegisConfig, MIN_SECRET_KEY_CHARS};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every problem instead of failing fast. An absent
/// `encryption.secret_key` is not an error here: the passphrase may still
/// come from the legacy environment variable or a prompt, and the engine
/// itself refuses to start without one.
pub fn validate_config(config: &AegisConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if let Some(key) = &config.encryption.secret_key {
        if key.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "encryption.secret_key must not be blank".to_string(),
            });
        } else if key.chars().count() < MIN_SECRET_KEY_CHARS {
            // Never echo the key itself.
            errors.push(ConfigError::Validation {
                message: format!(
                    "encryption.secret_key is too short: minimum {MIN_SECRET_KEY_CHARS} characters, 32 recommended"
                ),
            });
        }
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    let level = config.log.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "log.level `{}` is not one of {}",
                config.log.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
