// SPDX-FileCopyrightText: 2026 Aegis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Passphrase acquisition at process startup.

use aegis_config::model::EncryptionConfig;
use aegis_core::AegisError;
use secrecy::SecretString;

/// Legacy environment variable honoured when the layered config has no key.
pub const LEGACY_KEY_ENV_VAR: &str = "ENCRYPTION_SECRET_KEY";

/// Find the passphrase without ever prompting.
///
/// Priority:
/// 1. `encryption.secret_key` from the layered config (files and
///    `AEGIS_ENCRYPTION_SECRET_KEY`)
/// 2. `ENCRYPTION_SECRET_KEY`
///
/// Empty values are skipped. Returns `None` when nothing is set; the engine
/// turns that into a fatal configuration error.
pub fn resolve_passphrase(config: &EncryptionConfig) -> Option<SecretString> {
    if let Some(key) = config.secret_key.as_ref().filter(|k| !k.is_empty()) {
        return Some(SecretString::from(key.clone()));
    }

    std::env::var(LEGACY_KEY_ENV_VAR)
        .ok()
        .filter(|k| !k.is_empty())
        .map(SecretString::from)
}

/// Like [`resolve_passphrase`], falling back to an interactive TTY prompt.
///
/// For operator tooling only; services should call [`resolve_passphrase`].
pub fn resolve_passphrase_interactive(
    config: &EncryptionConfig,
) -> Result<Option<SecretString>, AegisError> {
    if let Some(passphrase) = resolve_passphrase(config) {
        return Ok(Some(passphrase));
    }

    if !std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        return Ok(None);
    }

    eprint!("Encryption passphrase: ");
    let passphrase = rpassword::read_password()
        .map_err(|e| AegisError::Configuration(format!("failed to read passphrase: {e}")))?;
    if passphrase.is_empty() {
        return Ok(None);
    }
    Ok(Some(SecretString::from(passphrase)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use serial_test::serial;

    fn config_with(key: Option<&str>) -> EncryptionConfig {
        EncryptionConfig {
            secret_key: key.map(str::to_string),
        }
    }

    #[test]
    #[serial]
    fn config_value_wins_over_legacy_env() {
        // SAFETY: test-only env mutation, serialized with #[serial].
        unsafe { std::env::set_var(LEGACY_KEY_ENV_VAR, "legacy-passphrase-value") };
        let resolved = resolve_passphrase(&config_with(Some("config-passphrase-value")));
        unsafe { std::env::remove_var(LEGACY_KEY_ENV_VAR) };

        assert_eq!(
            resolved.unwrap().expose_secret(),
            "config-passphrase-value"
        );
    }

    #[test]
    #[serial]
    fn legacy_env_used_when_config_missing() {
        unsafe { std::env::set_var(LEGACY_KEY_ENV_VAR, "legacy-passphrase-value") };
        let resolved = resolve_passphrase(&config_with(None));
        unsafe { std::env::remove_var(LEGACY_KEY_ENV_VAR) };

        assert_eq!(
            resolved.unwrap().expose_secret(),
            "legacy-passphrase-value"
        );
    }

    #[test]
    #[serial]
    fn empty_values_are_skipped() {
        unsafe { std::env::set_var(LEGACY_KEY_ENV_VAR, "") };
        let resolved = resolve_passphrase(&config_with(Some("")));
        unsafe { std::env::remove_var(LEGACY_KEY_ENV_VAR) };

        assert!(resolved.is_none());
    }

    #[test]
    #[serial]
    fn interactive_without_tty_returns_none() {
        unsafe { std::env::remove_var(LEGACY_KEY_ENV_VAR) };
        // Test harness stdin is not a terminal.
        if !std::io::IsTerminal::is_terminal(&std::io::stdin()) {
            assert!(resolve_passphrase_interactive(&config_with(None))
                .unwrap()
                .is_none());
        }
    }
}
