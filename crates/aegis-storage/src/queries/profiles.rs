// SPDX-FileCopyrightText: 2026 Aegis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Auth profile CRUD over sealed credential rows.
//!
//! These functions never see plaintext; encryption is done by
//! [`crate::store::ProfileStore`] before and after each call.

use aegis_core::AegisError;
use aegis_credentials::SealedCredential;
use rusqlite::{OptionalExtension, params};
use tracing::debug;

use crate::database::{Database, map_tr_err};
use crate::models::ProfileRow;

fn now() -> String {
    chrono::Utc::now()
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
}

/// Insert a credentials row and the profile owning it. Returns the profile id.
pub async fn insert_profile(
    db: &Database,
    environment_id: i64,
    name: &str,
    sealed: &SealedCredential,
) -> Result<i64, AegisError> {
    let name = name.to_string();
    let sealed = sealed.clone();
    let timestamp = now();

    let id = db
        .connection()
        .call(move |conn| -> Result<i64, rusqlite::Error> {
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO auth_credentials (auth_type, token, username, password)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    sealed.auth_type.to_string(),
                    sealed.token,
                    sealed.username,
                    sealed.password,
                ],
            )?;
            let credentials_id = tx.last_insert_rowid();
            tx.execute(
                "INSERT INTO auth_profiles (environment_id, name, credentials_id, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?4)",
                params![environment_id, name, credentials_id, timestamp],
            )?;
            let id = tx.last_insert_rowid();
            tx.commit()?;
            Ok(id)
        })
        .await
        .map_err(map_tr_err)?;

    debug!(profile_id = id, environment_id, "inserted auth profile");
    Ok(id)
}

/// Get a profile by id.
pub async fn get_profile(db: &Database, id: i64) -> Result<Option<ProfileRow>, AegisError> {
    db.connection()
        .call(move |conn| -> Result<Option<ProfileRow>, rusqlite::Error> {
            conn.query_row(
                &format!(
                    "SELECT {} FROM auth_profiles p
                     JOIN auth_credentials c ON c.credentials_id = p.credentials_id
                     WHERE p.auth_profile_id = ?1",
                    ProfileRow::COLUMNS
                ),
                params![id],
                ProfileRow::from_row,
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

/// Get a profile by its unique name within an environment.
pub async fn find_profile_by_name(
    db: &Database,
    environment_id: i64,
    name: &str,
) -> Result<Option<ProfileRow>, AegisError> {
    let name = name.to_string();
    db.connection()
        .call(move |conn| -> Result<Option<ProfileRow>, rusqlite::Error> {
            conn.query_row(
                &format!(
                    "SELECT {} FROM auth_profiles p
                     JOIN auth_credentials c ON c.credentials_id = p.credentials_id
                     WHERE p.environment_id = ?1 AND p.name = ?2",
                    ProfileRow::COLUMNS
                ),
                params![environment_id, name],
                ProfileRow::from_row,
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

/// List an environment's profiles ordered by name.
pub async fn list_profiles(
    db: &Database,
    environment_id: i64,
) -> Result<Vec<ProfileRow>, AegisError> {
    db.connection()
        .call(move |conn| -> Result<Vec<ProfileRow>, rusqlite::Error> {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM auth_profiles p
                 JOIN auth_credentials c ON c.credentials_id = p.credentials_id
                 WHERE p.environment_id = ?1
                 ORDER BY p.name",
                ProfileRow::COLUMNS
            ))?;
            let rows = stmt.query_map(params![environment_id], ProfileRow::from_row)?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)
}

/// Every profile in every environment, for maintenance tasks.
pub async fn list_all_profiles(db: &Database) -> Result<Vec<ProfileRow>, AegisError> {
    db.connection()
        .call(move |conn| -> Result<Vec<ProfileRow>, rusqlite::Error> {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM auth_profiles p
                 JOIN auth_credentials c ON c.credentials_id = p.credentials_id
                 ORDER BY p.environment_id, p.name",
                ProfileRow::COLUMNS
            ))?;
            let rows = stmt.query_map([], ProfileRow::from_row)?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)
}

/// Overwrite a profile's credentials row. Returns `false` if no such profile.
pub async fn update_profile_credentials(
    db: &Database,
    id: i64,
    sealed: &SealedCredential,
) -> Result<bool, AegisError> {
    let sealed = sealed.clone();
    let timestamp = now();

    let updated = db
        .connection()
        .call(move |conn| -> Result<bool, rusqlite::Error> {
            let tx = conn.transaction()?;
            let credentials_id: Option<i64> = tx
                .query_row(
                    "SELECT credentials_id FROM auth_profiles WHERE auth_profile_id = ?1",
                    params![id],
                    |row| row.get(0),
                )
                .optional()?;
            let Some(credentials_id) = credentials_id else {
                return Ok(false);
            };

            tx.execute(
                "UPDATE auth_credentials
                 SET auth_type = ?1, token = ?2, username = ?3, password = ?4
                 WHERE credentials_id = ?5",
                params![
                    sealed.auth_type.to_string(),
                    sealed.token,
                    sealed.username,
                    sealed.password,
                    credentials_id,
                ],
            )?;
            tx.execute(
                "UPDATE auth_profiles SET updated_at = ?1 WHERE auth_profile_id = ?2",
                params![timestamp, id],
            )?;
            tx.commit()?;
            Ok(true)
        })
        .await
        .map_err(map_tr_err)?;

    debug!(profile_id = id, updated, "updated auth profile credentials");
    Ok(updated)
}

/// Delete a profile and its credentials row. Returns `false` if no such profile.
pub async fn delete_profile(db: &Database, id: i64) -> Result<bool, AegisError> {
    let deleted = db
        .connection()
        .call(move |conn| -> Result<bool, rusqlite::Error> {
            let tx = conn.transaction()?;
            let credentials_id: Option<i64> = tx
                .query_row(
                    "SELECT credentials_id FROM auth_profiles WHERE auth_profile_id = ?1",
                    params![id],
                    |row| row.get(0),
                )
                .optional()?;
            let Some(credentials_id) = credentials_id else {
                return Ok(false);
            };

            tx.execute(
                "DELETE FROM auth_profiles WHERE auth_profile_id = ?1",
                params![id],
            )?;
            tx.execute(
                "DELETE FROM auth_credentials WHERE credentials_id = ?1",
                params![credentials_id],
            )?;
            tx.commit()?;
            Ok(true)
        })
        .await
        .map_err(map_tr_err)?;

    debug!(profile_id = id, deleted, "deleted auth profile");
    Ok(deleted)
}
