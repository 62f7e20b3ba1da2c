// SPDX-FileCopyrightText: 2026 Aegis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Field-level conversion between in-memory secrets and stored payloads.
//!
//! The persistence layer receives a converter at construction and calls it
//! for every protected column. There is no process-wide engine and no
//! passthrough fallback: a converter always has an engine.

use std::sync::Arc;

use aegis_core::AegisError;
use secrecy::{ExposeSecret, SecretString};

use crate::engine::EncryptionEngine;

/// Encrypts secrets on the way to a column and decrypts them on the way back.
#[derive(Debug, Clone)]
pub struct EncryptedFieldConverter {
    engine: Arc<EncryptionEngine>,
}

impl EncryptedFieldConverter {
    pub fn new(engine: Arc<EncryptionEngine>) -> Self {
        Self { engine }
    }

    /// The engine this converter writes through.
    pub fn engine(&self) -> &Arc<EncryptionEngine> {
        &self.engine
    }

    /// Value to store for `attribute`. `None` stays `None`.
    pub fn to_column(&self, attribute: Option<&SecretString>) -> Result<Option<String>, AegisError> {
        self.engine.encrypt(attribute.map(|s| s.expose_secret()))
    }

    /// Secret held in a stored column. `None` stays `None`.
    pub fn from_column(&self, column: Option<&str>) -> Result<Option<SecretString>, AegisError> {
        Ok(self.engine.decrypt(column)?.map(SecretString::from))
    }
}
