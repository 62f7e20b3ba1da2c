// SPDX-FileCopyrightText: 2026 Aegis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authentication credentials for Aegis profiles.
//!
//! A profile carries one [`CredentialVariant`]; each variant validates its own
//! fields and renders an HTTP `Authorization` header value. Variants are sealed
//! into a [`SealedCredential`] for storage, with secret fields encrypted by an
//! injected [`aegis_vault::EncryptedFieldConverter`].

pub mod profile;
pub mod record;
pub mod variant;

pub use profile::AuthProfile;
pub use record::SealedCredential;
pub use variant::{BasicAuth, BearerToken, Credential, CredentialVariant};
