// SPDX-FileCopyrightText: 2026 Aegis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the credential and storage crates.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Discriminator identifying a credential scheme.
///
/// The string form (`BEARER_TOKEN`, `BASIC_AUTH`) is stable: it is stored next
/// to sealed credential columns and returned to API clients.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthType {
    BearerToken,
    BasicAuth,
}
