// SPDX-FileCopyrightText: 2026 Aegis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Named auth profiles scoped to an environment.

use aegis_core::{AegisError, AuthType};

use crate::variant::{Credential, CredentialVariant};

/// A named authentication profile owning at most one credential variant.
///
/// `id` is `None` until the profile has been persisted.
#[derive(Debug)]
pub struct AuthProfile {
    pub id: Option<i64>,
    pub environment_id: i64,
    pub name: String,
    credentials: Option<CredentialVariant>,
}

impl AuthProfile {
    pub fn new(
        environment_id: i64,
        name: impl Into<String>,
        credentials: impl Into<CredentialVariant>,
    ) -> Self {
        Self {
            id: None,
            environment_id,
            name: name.into(),
            credentials: Some(credentials.into()),
        }
    }

    /// A profile with nothing attached yet.
    pub fn without_credentials(environment_id: i64, name: impl Into<String>) -> Self {
        Self {
            id: None,
            environment_id,
            name: name.into(),
            credentials: None,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn credentials(&self) -> Option<&CredentialVariant> {
        self.credentials.as_ref()
    }

    /// Replace the attached variant; the previous one is dropped.
    pub fn set_credentials(&mut self, credentials: Option<CredentialVariant>) {
        self.credentials = credentials;
    }

    pub fn auth_type(&self) -> Option<AuthType> {
        self.credentials.as_ref().map(Credential::auth_type)
    }

    pub fn build_authorization_header(&self) -> Result<String, AegisError> {
        self.attached()?.build_authorization_header()
    }

    pub fn type_tag(&self) -> Result<String, AegisError> {
        Ok(self.attached()?.type_tag())
    }

    fn attached(&self) -> Result<&CredentialVariant, AegisError> {
        self.credentials
            .as_ref()
            .ok_or_else(|| AegisError::MissingCredential {
                profile: self.name.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::{BasicAuth, BearerToken};

    #[test]
    fn delegates_to_attached_variant() {
        let profile = AuthProfile::new(1, "api", BearerToken::new("abc123"));
        assert_eq!(profile.build_authorization_header().unwrap(), "Bearer abc123");
        assert_eq!(profile.type_tag().unwrap(), "BEARER_TOKEN");
        assert_eq!(profile.auth_type(), Some(AuthType::BearerToken));
    }

    #[test]
    fn missing_credentials_name_the_profile() {
        let profile = AuthProfile::without_credentials(1, "orphan");
        assert_eq!(profile.auth_type(), None);

        let err = profile.build_authorization_header().unwrap_err();
        assert!(matches!(err, AegisError::MissingCredential { .. }));
        assert_eq!(
            err.to_string(),
            "No credentials configured for AuthProfile: orphan"
        );
        assert!(profile.type_tag().is_err());
    }

    #[test]
    fn replacing_credentials_switches_scheme() {
        let mut profile = AuthProfile::new(7, "svc", BearerToken::new("t")).with_id(3);
        profile.set_credentials(Some(BasicAuth::new("user", "pass").into()));

        assert_eq!(profile.id, Some(3));
        assert_eq!(profile.type_tag().unwrap(), "BASIC_AUTH");
        assert_eq!(profile.build_authorization_header().unwrap(), "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn incomplete_variant_error_surfaces_through_profile() {
        let profile = AuthProfile::new(1, "bad", BasicAuth::from_parts(None, None));
        let err = profile.build_authorization_header().unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("Username is required"));
    }
}
