// SPDX-FileCopyrightText: 2026 Aegis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Lookup order: `./aegis.toml` > `~/.config/aegis/aegis.toml` > `/etc/aegis/aegis.toml`,
//! with `AEGIS_*` environment variable overrides on top.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::AegisConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/aegis/aegis.toml";

/// Config file in the working directory.
pub const LOCAL_CONFIG_PATH: &str = "aegis.toml";

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/aegis/aegis.toml`
/// 3. `~/.config/aegis/aegis.toml`
/// 4. `./aegis.toml`
/// 5. `AEGIS_*` environment variables
pub fn load_config() -> Result<AegisConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no file lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<AegisConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AegisConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<AegisConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AegisConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(AegisConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(env_provider())
}

/// `~/.config/aegis/aegis.toml`, if the platform has a config dir.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("aegis").join("aegis.toml"))
}

/// Environment provider with explicit section mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so that
/// `AEGIS_ENCRYPTION_SECRET_KEY` lands on `encryption.secret_key`, not
/// `encryption.secret.key`.
fn env_provider() -> Env {
    Env::prefixed("AEGIS_").map(|key| {
        key.as_str()
            .replacen("log_", "log.", 1)
            .replacen("encryption_", "encryption.", 1)
            .replacen("storage_", "storage.", 1)
            .into()
    })
}
