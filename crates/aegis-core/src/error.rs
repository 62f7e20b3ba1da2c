// SPDX-FileCopyrightText: 2026 Aegis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Aegis credential protection subsystem.
//!
//! Cryptographic failures are collapsed into [`AegisError::Encryption`] and
//! [`AegisError::Decryption`] so callers cannot tell which stage failed.
//! Validation failures are kept apart so user-facing layers can describe a
//! fixable input without exposing cryptographic internals.

use thiserror::Error;

use crate::types::AuthType;

/// The primary error type shared by every Aegis crate.
#[derive(Debug, Error)]
pub enum AegisError {
    /// Missing or unusable configuration (passphrase absent or too short).
    /// Fatal at startup.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An encrypt call failed (key setup or entropy failure).
    #[error("encryption error: {0}")]
    Encryption(String),

    /// A payload could not be decoded or failed authentication.
    /// Treat as corrupted data or data sealed under a different key.
    #[error("decryption error: {0}")]
    Decryption(String),

    /// A credential variant is missing a required field.
    #[error("{message}")]
    IncompleteCredential {
        auth_type: AuthType,
        field: &'static str,
        message: String,
    },

    /// A profile has no credential variant attached.
    #[error("No credentials configured for AuthProfile: {profile}")]
    MissingCredential { profile: String },

    /// Persistence failures (connection, query, schema).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AegisError {
    /// True for failures of the encryption engine itself.
    pub fn is_crypto(&self) -> bool {
        matches!(self, Self::Encryption(_) | Self::Decryption(_))
    }

    /// True for failures the caller can fix by supplying complete data.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::IncompleteCredential { .. } | Self::MissingCredential { .. }
        )
    }

    /// Wrap any error as a storage failure.
    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Storage {
            source: Box::new(err),
        }
    }
}
