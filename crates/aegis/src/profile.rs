// SPDX-FileCopyrightText: 2026 Aegis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `aegis profile` subcommands.

use aegis_core::AegisError;
use aegis_credentials::{AuthProfile, BasicAuth, BearerToken};
use aegis_storage::ProfileStore;
use tracing::info;

use crate::input::secret_or_prompt;

/// Store a new Bearer token profile. Returns the new profile id.
pub async fn add_bearer(
    store: &ProfileStore,
    environment_id: i64,
    name: &str,
    token: Option<String>,
) -> Result<i64, AegisError> {
    let token = secret_or_prompt(token, "Bearer token: ")?;
    let profile = AuthProfile::new(
        environment_id,
        name,
        BearerToken::from_parts(Some(token)),
    );
    let id = store.save(&profile).await?;
    info!(profile_id = id, environment_id, "bearer profile added");
    Ok(id)
}

/// Store a new Basic auth profile. Returns the new profile id.
pub async fn add_basic(
    store: &ProfileStore,
    environment_id: i64,
    name: &str,
    username: String,
    password: Option<String>,
) -> Result<i64, AegisError> {
    let password = secret_or_prompt(password, "Password: ")?;
    let profile = AuthProfile::new(
        environment_id,
        name,
        BasicAuth::from_parts(Some(username), Some(password)),
    );
    let id = store.save(&profile).await?;
    info!(profile_id = id, environment_id, "basic auth profile added");
    Ok(id)
}

/// The `Authorization` header value for a named profile.
pub async fn header(
    store: &ProfileStore,
    environment_id: i64,
    name: &str,
) -> Result<String, AegisError> {
    find(store, environment_id, name)
        .await?
        .build_authorization_header()
}

/// One line per profile: id, name, and scheme. Never prints secrets.
pub async fn list(store: &ProfileStore, environment_id: i64) -> Result<Vec<String>, AegisError> {
    let profiles = store.list(environment_id).await?;
    Ok(profiles
        .iter()
        .map(|p| {
            let id = p.id.map(|id| id.to_string()).unwrap_or_default();
            let scheme = p
                .auth_type()
                .map(|t| t.to_string())
                .unwrap_or_else(|| "-".to_string());
            format!("{id:>5}  {:<24} {scheme}", p.name)
        })
        .collect())
}

/// Delete a named profile.
pub async fn remove(
    store: &ProfileStore,
    environment_id: i64,
    name: &str,
) -> Result<(), AegisError> {
    let profile = find(store, environment_id, name).await?;
    if let Some(id) = profile.id {
        store.delete(id).await?;
        info!(profile_id = id, environment_id, "profile removed");
    }
    Ok(())
}

async fn find(
    store: &ProfileStore,
    environment_id: i64,
    name: &str,
) -> Result<AuthProfile, AegisError> {
    store
        .find_by_name(environment_id, name)
        .await?
        .ok_or_else(|| {
            AegisError::Internal(format!(
                "no profile named '{name}' in environment {environment_id}"
            ))
        })
}
