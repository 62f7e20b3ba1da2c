// SPDX-FileCopyrightText: 2026 Aegis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret redaction for log output and error messages.
//!
//! Two complementary mechanisms:
//! 1. **Pattern-based**: `Authorization` header values (`Bearer <token>`,
//!    `Basic <base64>`).
//! 2. **Exact-match**: secret values registered at runtime, such as the
//!    encryption passphrase.

use std::io::Write;
use std::sync::{Arc, LazyLock, RwLock};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use regex::{Captures, Regex};
use secrecy::{ExposeSecret, SecretString};

// Any token length is masked. The bare word "token" after the scheme is
// prose ("Bearer Token authentication"), not a credential.
static BEARER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(Bearer)\s+([A-Za-z0-9._~+/\-]+=*)").expect("valid bearer pattern")
});

// Only masked when the value decodes to `user:pass`, so prose like
// "Basic authentication" is left alone.
static BASIC_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(Basic)\s+([A-Za-z0-9+/]+={0,2})").expect("valid basic pattern")
});

/// The redaction placeholder.
const REDACTED: &str = "[REDACTED]";

/// Shared list of exact values to mask, updated as secrets become known.
pub type KnownSecrets = Arc<RwLock<Vec<String>>>;

/// Redact header credentials and exact known values from `input`.
///
/// The scheme name is kept (`Bearer [REDACTED]`) so log lines stay readable.
pub fn redact(input: &str, known_values: &[String]) -> String {
    let result = BEARER_PATTERN.replace_all(input, |caps: &Captures<'_>| {
        if caps[2].eq_ignore_ascii_case("token") {
            caps[0].to_string()
        } else {
            format!("{} {REDACTED}", &caps[1])
        }
    });
    let mut result = BASIC_PATTERN
        .replace_all(&result, |caps: &Captures<'_>| {
            if looks_like_basic_credentials(&caps[2]) {
                format!("{} {REDACTED}", &caps[1])
            } else {
                caps[0].to_string()
            }
        })
        .into_owned();

    // Longest first so a value containing another is masked whole.
    let mut sorted_values: Vec<&String> = known_values.iter().collect();
    sorted_values.sort_by_key(|v| std::cmp::Reverse(v.len()));
    for value in sorted_values {
        if !value.is_empty() {
            result = result.replace(value.as_str(), REDACTED);
        }
    }

    result
}

fn looks_like_basic_credentials(encoded: &str) -> bool {
    STANDARD
        .decode(encoded)
        .ok()
        .is_some_and(|decoded| decoded.contains(&b':'))
}

/// A writer wrapper that redacts secrets from output.
///
/// Wraps any `Write` implementor. A closure returning a `RedactingWriter` can
/// be handed to `tracing_subscriber::fmt().with_writer(..)`.
pub struct RedactingWriter<W> {
    inner: W,
    known_values: KnownSecrets,
}

impl<W: Write> RedactingWriter<W> {
    pub fn new(inner: W, known_values: KnownSecrets) -> Self {
        Self {
            inner,
            known_values,
        }
    }

    /// Add a value to the redaction list. Blank values are ignored.
    pub fn add_known_value(known_values: &KnownSecrets, value: String) {
        if value.trim().is_empty() {
            return;
        }
        if let Ok(mut values) = known_values.write()
            && !values.contains(&value)
        {
            values.push(value);
        }
    }

    /// Register a secret held in a [`SecretString`].
    pub fn add_secret(known_values: &KnownSecrets, secret: &SecretString) {
        Self::add_known_value(known_values, secret.expose_secret().to_string());
    }
}

impl<W: Write> Write for RedactingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let input = String::from_utf8_lossy(buf);
        let known = self
            .known_values
            .read()
            .map(|v| v.clone())
            .unwrap_or_default();
        let redacted = redact(&input, &known);
        self.inner.write_all(redacted.as_bytes())?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
