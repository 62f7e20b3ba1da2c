// SPDX-FileCopyrightText: 2026 Aegis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key fails
//! at startup instead of silently leaving encryption unconfigured.

use serde::{Deserialize, Serialize};

/// Minimum passphrase length, counted in characters.
pub const MIN_SECRET_KEY_CHARS: usize = 16;

/// Top-level Aegis configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AegisConfig {
    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,

    /// Encryption engine settings.
    #[serde(default)]
    pub encryption: EncryptionConfig,

    /// Profile store settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Default level when `RUST_LOG` is not set (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Encryption engine configuration.
///
/// `secret_key` is the passphrase the engine derives its key from. `Debug`
/// output never includes it.
#[derive(Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EncryptionConfig {
    /// Passphrase for key derivation. `None` defers to the legacy
    /// `ENCRYPTION_SECRET_KEY` variable or an interactive prompt.
    #[serde(default, skip_serializing)]
    pub secret_key: Option<String>,
}

impl std::fmt::Debug for EncryptionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptionConfig")
            .field("secret_key", &self.secret_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Profile store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database holding auth profiles.
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
    dirs::data_local_dir()
        .map(|d| d.join("aegis").join("aegis.db"))
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "aegis.db".to_string())
}
