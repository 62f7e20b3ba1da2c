// SPDX-FileCopyrightText: 2026 Aegis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Row types for the profile tables.

use std::str::FromStr;

use aegis_core::{AegisError, AuthType};
use aegis_credentials::SealedCredential;

/// A joined `auth_profiles` + `auth_credentials` row, secret columns still
/// encrypted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRow {
    pub id: i64,
    pub environment_id: i64,
    pub name: String,
    pub credentials_id: i64,
    /// Raw discriminator text as stored.
    pub auth_type: String,
    pub token: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl ProfileRow {
    pub(crate) const COLUMNS: &'static str = "p.auth_profile_id, p.environment_id, p.name, \
         p.credentials_id, c.auth_type, c.token, c.username, c.password, \
         p.created_at, p.updated_at";

    pub(crate) fn from_row(row: &rusqlite::Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get(0)?,
            environment_id: row.get(1)?,
            name: row.get(2)?,
            credentials_id: row.get(3)?,
            auth_type: row.get(4)?,
            token: row.get(5)?,
            username: row.get(6)?,
            password: row.get(7)?,
            created_at: row.get(8)?,
            updated_at: row.get(9)?,
        })
    }

    /// The sealed credential columns, with the discriminator parsed.
    ///
    /// An unrecognized `auth_type` is a storage error: the row was written by
    /// something that knows a scheme this build does not.
    pub fn sealed(&self) -> Result<SealedCredential, AegisError> {
        let auth_type = AuthType::from_str(&self.auth_type).map_err(|_| AegisError::Storage {
            source: format!(
                "unknown auth_type '{}' on credentials {}",
                self.auth_type, self.credentials_id
            )
            .into(),
        })?;
        Ok(SealedCredential {
            auth_type,
            token: self.token.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        })
    }
}
