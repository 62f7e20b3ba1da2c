// SPDX-FileCopyrightText: 2026 Aegis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Encryption engine protecting Aegis credential secrets at rest.
//!
//! A single passphrase, supplied once at startup, is stretched with
//! PBKDF2-HMAC-SHA256 into an AES-256-GCM key. Each secret is sealed with a
//! fresh random nonce and stored as one opaque Base64 string.

pub mod converter;
pub mod crypto;
pub mod engine;
pub mod kdf;
pub mod prompt;

pub use converter::EncryptedFieldConverter;
pub use engine::{validate_passphrase, EncryptionEngine};
pub use prompt::{resolve_passphrase, resolve_passphrase_interactive};
