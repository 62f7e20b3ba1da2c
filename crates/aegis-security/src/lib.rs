// SPDX-FileCopyrightText: 2026 Aegis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret redaction for Aegis.
//!
//! Authorization header values and registered secret values are masked before
//! anything reaches a log sink.

pub mod redact;

pub use redact::{KnownSecrets, RedactingWriter, redact};
