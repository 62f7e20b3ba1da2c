// SPDX-FileCopyrightText: 2026 Aegis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reading values that should not appear on the command line.

use std::io::{IsTerminal, Read};

use aegis_core::AegisError;
use secrecy::SecretString;

/// Use `value` if given, otherwise read all of stdin.
///
/// A single trailing newline (as left by `echo`) is dropped.
pub fn value_or_stdin(value: Option<String>) -> Result<String, AegisError> {
    if let Some(value) = value {
        return Ok(value);
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| AegisError::Internal(format!("failed to read stdin: {e}")))?;
    Ok(strip_newline(buf))
}

/// Use `value` if given, otherwise prompt without echo on a TTY or read one
/// line from piped stdin.
pub fn secret_or_prompt(value: Option<String>, prompt: &str) -> Result<SecretString, AegisError> {
    if let Some(value) = value {
        return Ok(SecretString::from(value));
    }

    let read = if std::io::stdin().is_terminal() {
        rpassword::prompt_password(prompt)
    } else {
        let mut line = String::new();
        std::io::stdin().read_line(&mut line).map(|_| line)
    };
    let value = read.map_err(|e| AegisError::Internal(format!("failed to read input: {e}")))?;
    Ok(SecretString::from(strip_newline(value)))
}

fn strip_newline(mut value: String) -> String {
    if value.ends_with('\n') {
        value.pop();
        if value.ends_with('\r') {
            value.pop();
        }
    }
    value
}
