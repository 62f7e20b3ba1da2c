// SPDX-FileCopyrightText: 2026 Aegis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence for Aegis auth profiles.
//!
//! Provides versioned schema migrations, a single-writer connection via
//! `tokio-rusqlite`, typed queries over sealed credential rows, and
//! [`ProfileStore`], which encrypts and decrypts secret columns at the
//! boundary using an injected [`aegis_vault::EncryptedFieldConverter`].

pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;
pub mod store;

pub use database::Database;
pub use models::ProfileRow;
pub use store::ProfileStore;
