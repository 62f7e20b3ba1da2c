// SPDX-FileCopyrightText: 2026 Aegis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! At-rest form of a credential variant.
//!
//! A [`SealedCredential`] is a flat record: an `auth_type` discriminator plus
//! the union of every variant's fields, with secret fields holding ciphertext.
//! It is what the storage layer writes, and the only way back to a
//! [`CredentialVariant`] is through [`SealedCredential::open`], which
//! dispatches on the discriminator.

use aegis_core::{AegisError, AuthType};
use aegis_vault::EncryptedFieldConverter;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::variant::{BasicAuth, BearerToken, Credential, CredentialVariant};

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedCredential {
    pub auth_type: AuthType,
    /// Encrypted bearer token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Plain username.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Encrypted password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl std::fmt::Debug for SealedCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SealedCredential")
            .field("auth_type", &self.auth_type)
            .field("token", &self.token.as_ref().map(|_| "[CIPHERTEXT]"))
            .field("username", &self.username.as_ref().map(|_| "[REDACTED]"))
            .field("password", &self.password.as_ref().map(|_| "[CIPHERTEXT]"))
            .finish()
    }
}

impl SealedCredential {
    /// Encrypt the secret fields of `variant`.
    ///
    /// Sealing does not validate: an incomplete variant is stored as-is and
    /// rejected later when a header is built from it.
    pub fn seal(
        variant: &CredentialVariant,
        converter: &EncryptedFieldConverter,
    ) -> Result<Self, AegisError> {
        let sealed = match variant {
            CredentialVariant::BearerToken(bearer) => Self {
                auth_type: AuthType::BearerToken,
                token: converter.to_column(bearer.token())?,
                username: None,
                password: None,
            },
            CredentialVariant::BasicAuth(basic) => Self {
                auth_type: AuthType::BasicAuth,
                token: None,
                username: basic.username().map(str::to_owned),
                password: converter.to_column(basic.password())?,
            },
        };
        debug!(auth_type = %variant.auth_type(), "sealed credential");
        Ok(sealed)
    }

    /// Decrypt back into the variant named by `auth_type`.
    ///
    /// Fields belonging to other variants are ignored.
    pub fn open(&self, converter: &EncryptedFieldConverter) -> Result<CredentialVariant, AegisError> {
        let variant = match self.auth_type {
            AuthType::BearerToken => {
                BearerToken::from_parts(converter.from_column(self.token.as_deref())?).into()
            }
            AuthType::BasicAuth => BasicAuth::from_parts(
                self.username.clone(),
                converter.from_column(self.password.as_deref())?,
            )
            .into(),
        };
        Ok(variant)
    }
}
