// SPDX-FileCopyrightText: 2026 Aegis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Profile repository with encryption at the persistence boundary.

use aegis_core::AegisError;
use aegis_credentials::{AuthProfile, CredentialVariant, SealedCredential};
use aegis_vault::EncryptedFieldConverter;

use crate::database::Database;
use crate::models::ProfileRow;
use crate::queries::profiles;

/// Stores [`AuthProfile`]s, sealing credential variants on the way in and
/// opening them on the way out.
///
/// Crypto runs on the caller's task; only ciphertext crosses into the
/// database thread.
pub struct ProfileStore {
    db: Database,
    converter: EncryptedFieldConverter,
}

impl ProfileStore {
    pub fn new(db: Database, converter: EncryptedFieldConverter) -> Self {
        Self { db, converter }
    }

    /// Insert a new profile and return its id.
    ///
    /// The profile must carry a credential variant; `profile.id` is ignored.
    pub async fn save(&self, profile: &AuthProfile) -> Result<i64, AegisError> {
        let variant = profile
            .credentials()
            .ok_or_else(|| AegisError::MissingCredential {
                profile: profile.name.clone(),
            })?;
        let sealed = SealedCredential::seal(variant, &self.converter)?;
        profiles::insert_profile(&self.db, profile.environment_id, &profile.name, &sealed).await
    }

    pub async fn get(&self, id: i64) -> Result<Option<AuthProfile>, AegisError> {
        profiles::get_profile(&self.db, id)
            .await?
            .map(|row| self.open_row(row))
            .transpose()
    }

    pub async fn find_by_name(
        &self,
        environment_id: i64,
        name: &str,
    ) -> Result<Option<AuthProfile>, AegisError> {
        profiles::find_profile_by_name(&self.db, environment_id, name)
            .await?
            .map(|row| self.open_row(row))
            .transpose()
    }

    /// Every profile in an environment, decrypted, ordered by name.
    pub async fn list(&self, environment_id: i64) -> Result<Vec<AuthProfile>, AegisError> {
        profiles::list_profiles(&self.db, environment_id)
            .await?
            .into_iter()
            .map(|row| self.open_row(row))
            .collect()
    }

    /// Replace a profile's credentials. Returns `false` if the id is unknown.
    pub async fn update_credentials(
        &self,
        id: i64,
        credentials: &CredentialVariant,
    ) -> Result<bool, AegisError> {
        let sealed = SealedCredential::seal(credentials, &self.converter)?;
        profiles::update_profile_credentials(&self.db, id, &sealed).await
    }

    /// Remove a profile and its credentials. Returns `false` if the id is unknown.
    pub async fn delete(&self, id: i64) -> Result<bool, AegisError> {
        profiles::delete_profile(&self.db, id).await
    }

    pub async fn close(self) -> Result<(), AegisError> {
        self.db.close().await
    }

    fn open_row(&self, row: ProfileRow) -> Result<AuthProfile, AegisError> {
        let credentials = row.sealed()?.open(&self.converter)?;
        Ok(AuthProfile::new(row.environment_id, row.name, credentials).with_id(row.id))
    }
}
