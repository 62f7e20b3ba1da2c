// SPDX-FileCopyrightText: 2026 Aegis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for Aegis.
//!
//! TOML files in an XDG-style hierarchy, `AEGIS_*` environment overrides,
//! strict unknown-key rejection, and miette diagnostics for anything that
//! fails to parse or validate. The only value the credential core needs from
//! here is the encryption passphrase.
//!
//! # Usage
//!
//! ```no_run
//! use aegis_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("profile store: {}", config.storage.database_path);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::AegisConfig;

use tracing::debug;

/// Load configuration from the standard hierarchy and validate it.
pub fn load_and_validate() -> Result<AegisConfig, Vec<ConfigError>> {
    finish(loader::load_config())
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<AegisConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content))
}

/// Load configuration from an explicit file (plus env overrides) and validate it.
pub fn load_and_validate_path(path: &std::path::Path) -> Result<AegisConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_path(path))
}

fn finish(loaded: Result<AegisConfig, figment::Error>) -> Result<AegisConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            debug!(
                secret_key_configured = config.encryption.secret_key.is_some(),
                "configuration loaded"
            );
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err)),
    }
}
