// SPDX-FileCopyrightText: 2026 Aegis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Aegis credential protection subsystem.
//!
//! Holds the error taxonomy and the credential discriminator used by the
//! vault, credential, and storage crates.

pub mod error;
pub mod types;

pub use error::AegisError;
pub use types::AuthType;
