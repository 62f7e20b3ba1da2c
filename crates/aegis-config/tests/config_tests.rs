// SPDX-FileCopyrightText: 2026 Aegis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Aegis configuration system.

use aegis_config::diagnostic::ConfigError;
use aegis_config::loader::load_config;
use aegis_config::model::AegisConfig;
use aegis_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_aegis_config() {
    let toml = r#"
[log]
level = "debug"

[encryption]
secret_key = "a-long-enough-passphrase"

[storage]
database_path = "/tmp/aegis-test.db"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.log.level, "debug");
    assert_eq!(
        config.encryption.secret_key.as_deref(),
        Some("a-long-enough-passphrase")
    );
    assert_eq!(config.storage.database_path, "/tmp/aegis-test.db");
}

/// Empty TOML falls back to defaults.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");
    assert_eq!(config.log.level, "info");
    assert!(config.encryption.secret_key.is_none());
    assert!(!config.storage.database_path.is_empty());
}

/// A misspelled key under [encryption] is rejected, not ignored.
#[test]
fn unknown_field_in_encryption_produces_suggestion() {
    let toml = r#"
[encryption]
secret_kye = "a-long-enough-passphrase"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown field");
    assert!(errors.iter().any(|e| matches!(
        e,
        ConfigError::UnknownKey { key, suggestion: Some(s), .. }
            if key == "secret_kye" && s == "secret_key"
    )));
}

/// Unknown top-level section is rejected.
#[test]
fn unknown_section_is_rejected() {
    let toml = r#"
[encrypton]
secret_key = "a-long-enough-passphrase"
"#;
    let errors = load_and_validate_str(toml).expect_err("should reject unknown section");
    assert!(errors
        .iter()
        .any(|e| matches!(e, ConfigError::UnknownKey { key, .. } if key == "encrypton")));
}

/// Wrong value type is reported as InvalidType.
#[test]
fn wrong_type_is_reported() {
    let toml = r#"
[encryption]
secret_key = 42
"#;
    let errors = load_and_validate_str(toml).expect_err("should reject integer key");
    assert!(errors
        .iter()
        .any(|e| matches!(e, ConfigError::InvalidType { .. })));
}

/// Too-short passphrase in the file fails validation.
#[test]
fn short_secret_key_fails_validation() {
    let toml = r#"
[encryption]
secret_key = "short"
"#;
    let errors = load_and_validate_str(toml).expect_err("short key must fail");
    assert!(errors.iter().any(
        |e| matches!(e, ConfigError::Validation { message } if message.contains("too short"))
    ));
}

/// `AEGIS_ENCRYPTION_SECRET_KEY` maps to encryption.secret_key
/// (not encryption.secret.key).
#[test]
fn env_var_sets_secret_key() {
    figment::Jail::expect_with(|jail| {
        jail.set_env("AEGIS_ENCRYPTION_SECRET_KEY", "passphrase-from-env!!");
        let config = load_config()?;
        assert_eq!(
            config.encryption.secret_key.as_deref(),
            Some("passphrase-from-env!!")
        );
        Ok(())
    });
}

/// Environment overrides the local aegis.toml.
#[test]
fn env_var_overrides_local_file() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "aegis.toml",
            r#"
[storage]
database_path = "from-file.db"

[log]
level = "warn"
"#,
        )?;
        jail.set_env("AEGIS_STORAGE_DATABASE_PATH", "from-env.db");

        let config: AegisConfig = load_config()?;
        assert_eq!(config.storage.database_path, "from-env.db");
        assert_eq!(config.log.level, "warn");
        Ok(())
    });
}

/// Missing config files are silently skipped.
#[test]
fn missing_config_files_silently_skipped() {
    let config = aegis_config::load_config_from_path(std::path::Path::new(
        "/nonexistent/path/aegis.toml",
    ))
    .expect("missing file should be silently skipped");
    assert_eq!(config.log.level, "info");
}
