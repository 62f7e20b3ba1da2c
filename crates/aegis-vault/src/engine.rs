// SPDX-FileCopyrightText: 2026 Aegis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The encryption engine: passphrase in, opaque Base64 payloads out.
//!
//! Payload format: `Base64(nonce(12) || ciphertext || tag(16))`, standard
//! alphabet with padding. Length varies with the plaintext.
//!
//! The engine is immutable once built. Share it behind an `Arc`; every method
//! takes `&self` and is safe to call from any number of threads.

use aegis_core::AegisError;
use aegis_config::model::MIN_SECRET_KEY_CHARS;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use ring::aead::LessSafeKey;
use ring::rand::SystemRandom;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info};

use crate::crypto;
use crate::kdf;

/// Symmetric authenticated encryption for individual secret strings.
///
/// Debug output omits the key.
pub struct EncryptionEngine {
    /// AES-256-GCM key derived from the passphrase; only ever in memory.
    key: LessSafeKey,
    rng: SystemRandom,
}

impl std::fmt::Debug for EncryptionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptionEngine")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

impl EncryptionEngine {
    /// Derive the key from `passphrase` and build the engine.
    ///
    /// Fails with [`AegisError::Configuration`] if the passphrase is absent,
    /// blank, or shorter than 16 characters.
    pub fn initialize(passphrase: Option<&SecretString>) -> Result<Self, AegisError> {
        let passphrase = passphrase.map(|p| p.expose_secret());
        validate_passphrase(passphrase)?;
        let passphrase = passphrase.unwrap_or_default();

        let key_bytes = kdf::derive_key(passphrase.as_bytes());
        let key = crypto::build_key(&key_bytes)?;

        info!("encryption engine initialized with AES-256-GCM and PBKDF2 key derivation");
        Ok(Self {
            key,
            rng: SystemRandom::new(),
        })
    }

    /// Encrypt `plaintext`. `None` and `""` pass through unchanged.
    pub fn encrypt(&self, plaintext: Option<&str>) -> Result<Option<String>, AegisError> {
        match plaintext {
            None => Ok(None),
            Some("") => Ok(Some(String::new())),
            Some(value) => self.encrypt_str(value).map(Some),
        }
    }

    /// Decrypt `payload`. `None` and `""` pass through unchanged.
    pub fn decrypt(&self, payload: Option<&str>) -> Result<Option<String>, AegisError> {
        match payload {
            None => Ok(None),
            Some("") => Ok(Some(String::new())),
            Some(value) => self.decrypt_str(value).map(Some),
        }
    }

    /// Encrypt a non-optional value. An empty string still passes through.
    pub fn encrypt_str(&self, plaintext: &str) -> Result<String, AegisError> {
        if plaintext.is_empty() {
            return Ok(String::new());
        }
        let sealed = crypto::seal(&self.key, &self.rng, plaintext.as_bytes())?;
        Ok(STANDARD.encode(sealed))
    }

    /// Decrypt a non-optional payload. An empty string still passes through.
    ///
    /// Every failure collapses into the same opaque [`AegisError::Decryption`].
    pub fn decrypt_str(&self, payload: &str) -> Result<String, AegisError> {
        if payload.is_empty() {
            return Ok(String::new());
        }

        let sealed = STANDARD.decode(payload).map_err(|_| {
            debug!(stage = "base64", "encrypted payload rejected");
            decryption_failed()
        })?;

        let plaintext = crypto::open(&self.key, &sealed).map_err(|err| {
            debug!(stage = "open", "encrypted payload rejected");
            err
        })?;

        String::from_utf8(plaintext).map_err(|_| {
            debug!(stage = "utf8", "encrypted payload rejected");
            decryption_failed()
        })
    }
}

/// Check the startup guards without deriving a key.
pub fn validate_passphrase(passphrase: Option<&str>) -> Result<(), AegisError> {
    match passphrase {
        None => Err(not_configured()),
        Some(p) if p.trim().is_empty() => Err(not_configured()),
        Some(p) if p.chars().count() < MIN_SECRET_KEY_CHARS => Err(AegisError::Configuration(
            format!(
                "encryption secret key is too short: minimum {MIN_SECRET_KEY_CHARS} characters required, 32 recommended for AES-256"
            ),
        )),
        Some(_) => Ok(()),
    }
}

fn not_configured() -> AegisError {
    AegisError::Configuration(
        "encryption secret key is not configured: set `encryption.secret_key`, \
         AEGIS_ENCRYPTION_SECRET_KEY, or ENCRYPTION_SECRET_KEY"
            .to_string(),
    )
}

fn decryption_failed() -> AegisError {
    AegisError::Decryption("failed to decrypt data".to_string())
}
