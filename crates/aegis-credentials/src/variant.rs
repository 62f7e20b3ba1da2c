// SPDX-FileCopyrightText: 2026 Aegis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential variants and the shared header-building contract.
//!
//! Variants hold already-decrypted values. Secret fields are kept as
//! [`SecretString`] so they cannot leak through `Debug`; encryption happens
//! at the persistence boundary (see [`crate::record`]).

use aegis_core::{AegisError, AuthType};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use secrecy::{ExposeSecret, SecretString};
use zeroize::Zeroizing;

/// Capabilities every credential scheme provides.
pub trait Credential {
    /// Check that every required field is present and non-blank.
    fn validate(&self) -> Result<(), AegisError>;

    /// The exact `Authorization` header value. Validates first.
    fn build_authorization_header(&self) -> Result<String, AegisError>;

    /// Discriminator for this scheme.
    fn auth_type(&self) -> AuthType;

    /// Stable machine-readable identifier, e.g. `BEARER_TOKEN`.
    fn type_tag(&self) -> String {
        self.auth_type().to_string()
    }
}

/// `Authorization: Bearer <token>`.
#[derive(Debug, Default)]
pub struct BearerToken {
    token: Option<SecretString>,
}

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(SecretString::from(token.into())),
        }
    }

    /// Build from an optional, possibly missing, decrypted token.
    pub fn from_parts(token: Option<SecretString>) -> Self {
        Self { token }
    }

    pub fn token(&self) -> Option<&SecretString> {
        self.token.as_ref()
    }

    pub fn set_token(&mut self, token: Option<SecretString>) {
        self.token = token;
    }
}

impl Credential for BearerToken {
    fn validate(&self) -> Result<(), AegisError> {
        require(
            self.token.as_ref().map(|t| t.expose_secret()),
            AuthType::BearerToken,
            "token",
            "Token is required for Bearer Token authentication",
        )
    }

    fn build_authorization_header(&self) -> Result<String, AegisError> {
        self.validate()?;
        let token = self.token.as_ref().map(|t| t.expose_secret()).unwrap_or_default();
        Ok(format!("Bearer {token}"))
    }

    fn auth_type(&self) -> AuthType {
        AuthType::BearerToken
    }
}

/// `Authorization: Basic base64(username:password)`.
///
/// The username is sensitive but not encrypted at rest; it is still kept out
/// of `Debug` output.
#[derive(Default)]
pub struct BasicAuth {
    username: Option<String>,
    password: Option<SecretString>,
}

impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username.as_ref().map(|_| "[REDACTED]"))
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl BasicAuth {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(SecretString::from(password.into())),
        }
    }

    /// Build from optional, possibly missing, decrypted fields.
    pub fn from_parts(username: Option<String>, password: Option<SecretString>) -> Self {
        Self { username, password }
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn password(&self) -> Option<&SecretString> {
        self.password.as_ref()
    }

    pub fn set_username(&mut self, username: Option<String>) {
        self.username = username;
    }

    pub fn set_password(&mut self, password: Option<SecretString>) {
        self.password = password;
    }
}

impl Credential for BasicAuth {
    fn validate(&self) -> Result<(), AegisError> {
        require(
            self.username.as_deref(),
            AuthType::BasicAuth,
            "username",
            "Username is required for Basic Auth authentication",
        )?;
        require(
            self.password.as_ref().map(|p| p.expose_secret()),
            AuthType::BasicAuth,
            "password",
            "Password is required for Basic Auth authentication",
        )
    }

    fn build_authorization_header(&self) -> Result<String, AegisError> {
        self.validate()?;
        let username = self.username.as_deref().unwrap_or_default();
        let password = self
            .password
            .as_ref()
            .map(|p| p.expose_secret())
            .unwrap_or_default();

        let pair = Zeroizing::new(format!("{username}:{password}"));
        Ok(format!("Basic {}", STANDARD.encode(pair.as_bytes())))
    }

    fn auth_type(&self) -> AuthType {
        AuthType::BasicAuth
    }
}

/// The closed set of credential schemes a profile can carry.
///
/// Adding a scheme means adding a case here plus a struct implementing
/// [`Credential`]; the exhaustive matches below and in [`crate::record`]
/// point at every place that needs to learn about it.
#[derive(Debug)]
pub enum CredentialVariant {
    BearerToken(BearerToken),
    BasicAuth(BasicAuth),
}

impl CredentialVariant {
    fn as_credential(&self) -> &dyn Credential {
        match self {
            Self::BearerToken(c) => c,
            Self::BasicAuth(c) => c,
        }
    }
}

impl Credential for CredentialVariant {
    fn validate(&self) -> Result<(), AegisError> {
        self.as_credential().validate()
    }

    fn build_authorization_header(&self) -> Result<String, AegisError> {
        self.as_credential().build_authorization_header()
    }

    fn auth_type(&self) -> AuthType {
        self.as_credential().auth_type()
    }
}

impl From<BearerToken> for CredentialVariant {
    fn from(value: BearerToken) -> Self {
        Self::BearerToken(value)
    }
}

impl From<BasicAuth> for CredentialVariant {
    fn from(value: BasicAuth) -> Self {
        Self::BasicAuth(value)
    }
}

/// Missing or blank ⇒ [`AegisError::IncompleteCredential`].
fn require(
    value: Option<&str>,
    auth_type: AuthType,
    field: &'static str,
    message: &str,
) -> Result<(), AegisError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(AegisError::IncompleteCredential {
            auth_type,
            field,
            message: message.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incomplete_field(err: AegisError) -> &'static str {
        match err {
            AegisError::IncompleteCredential { field, .. } => field,
            other => panic!("expected incomplete credential, got {other:?}"),
        }
    }

    #[test]
    fn bearer_header() {
        let credential = BearerToken::new("abc123");
        assert_eq!(credential.build_authorization_header().unwrap(), "Bearer abc123");
    }

    #[test]
    fn bearer_token_is_not_reencoded() {
        let credential = BearerToken::new("a b+c/d=");
        assert_eq!(
            credential.build_authorization_header().unwrap(),
            "Bearer a b+c/d="
        );
    }

    #[test]
    fn bearer_type_tag() {
        assert_eq!(BearerToken::new("t").type_tag(), "BEARER_TOKEN");
    }

    #[test]
    fn bearer_missing_or_blank_token_fails() {
        for credential in [
            BearerToken::from_parts(None),
            BearerToken::new(""),
            BearerToken::new("   "),
        ] {
            let err = credential.build_authorization_header().unwrap_err();
            assert!(err.to_string().contains("Token is required"));
            assert_eq!(incomplete_field(err), "token");
        }
    }

    #[test]
    fn basic_header_vector() {
        let credential = BasicAuth::new("user", "pass");
        assert_eq!(
            credential.build_authorization_header().unwrap(),
            "Basic dXNlcjpwYXNz"
        );
    }

    #[test]
    fn basic_header_uses_standard_alphabet_with_padding() {
        // "~:~" is "fjp+" in the standard alphabet and "fjp-" in the URL-safe one.
        let credential = BasicAuth::new("~", "~");
        assert_eq!(credential.build_authorization_header().unwrap(), "Basic fjp+");

        let credential = BasicAuth::new("a?", ">");
        assert_eq!(credential.build_authorization_header().unwrap(), "Basic YT86Pg==");
    }

    #[test]
    fn basic_header_handles_special_and_unicode_characters() {
        let credential = BasicAuth::new("user@domain.com", "p@ss:w0rd!");
        assert_eq!(
            credential.build_authorization_header().unwrap(),
            format!("Basic {}", STANDARD.encode("user@domain.com:p@ss:w0rd!"))
        );

        let credential = BasicAuth::new("usuário", "señal🔐");
        assert_eq!(
            credential.build_authorization_header().unwrap(),
            format!("Basic {}", STANDARD.encode("usuário:señal🔐".as_bytes()))
        );
    }

    #[test]
    fn basic_type_tag() {
        assert_eq!(BasicAuth::new("u", "p").type_tag(), "BASIC_AUTH");
    }

    #[test]
    fn basic_missing_username_fails_first() {
        let credential = BasicAuth::from_parts(None, None);
        let err = credential.validate().unwrap_err();
        assert!(err.to_string().contains("Username is required"));
        assert_eq!(incomplete_field(err), "username");
    }

    #[test]
    fn basic_blank_username_fails() {
        let err = BasicAuth::new("", "x").validate().unwrap_err();
        assert_eq!(incomplete_field(err), "username");
    }

    #[test]
    fn basic_missing_password_fails() {
        let credential = BasicAuth::from_parts(Some("user".to_string()), None);
        let err = credential.build_authorization_header().unwrap_err();
        assert!(err.to_string().contains("Password is required"));
        assert_eq!(incomplete_field(err), "password");
    }

    #[test]
    fn variant_dispatches() {
        let bearer: CredentialVariant = BearerToken::new("my-token").into();
        let basic: CredentialVariant = BasicAuth::new("user", "pass").into();

        assert_eq!(bearer.auth_type(), AuthType::BearerToken);
        assert_eq!(basic.auth_type(), AuthType::BasicAuth);
        assert_eq!(bearer.build_authorization_header().unwrap(), "Bearer my-token");
        assert_eq!(basic.build_authorization_header().unwrap(), "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn validation_errors_are_not_crypto_errors() {
        let variant: CredentialVariant = BearerToken::from_parts(None).into();
        let err = variant.validate().unwrap_err();
        assert!(err.is_validation());
        assert!(!err.is_crypto());
    }

    #[test]
    fn debug_never_shows_secrets() {
        let bearer: CredentialVariant = BearerToken::new("bearer-secret-value").into();
        let basic: CredentialVariant = BasicAuth::new("alice-login", "basic-secret-value").into();

        let rendered = format!("{bearer:?} {basic:?}");
        assert!(!rendered.contains("bearer-secret-value"));
        assert!(!rendered.contains("basic-secret-value"));
        assert!(!rendered.contains("alice-login"));
    }

    #[test]
    fn setters_replace_fields() {
        let mut credential = BasicAuth::from_parts(None, None);
        credential.set_username(Some("user".to_string()));
        credential.set_password(Some(SecretString::from("pass".to_string())));
        assert_eq!(credential.username(), Some("user"));
        assert_eq!(credential.build_authorization_header().unwrap(), "Basic dXNlcjpwYXNz");

        let mut bearer = BearerToken::default();
        assert!(bearer.validate().is_err());
        bearer.set_token(Some(SecretString::from("abc123".to_string())));
        assert_eq!(bearer.build_authorization_header().unwrap(), "Bearer abc123");
    }
}
