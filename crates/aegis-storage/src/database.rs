// SPDX-FileCopyrightText: 2026 Aegis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup and migrations.
//!
//! All access is serialized through tokio-rusqlite's single background thread.

use aegis_core::AegisError;
use tracing::{debug, info};

use crate::migrations::run_migrations;

/// Handle to the profile database.
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (or create) the database file at `path` and bring the schema up
    /// to date.
    pub async fn open(path: &str) -> Result<Self, AegisError> {
        if let Some(parent) = std::path::Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(AegisError::storage)?;
        }

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(AegisError::storage)?;
        let db = Self::init(conn, true).await?;
        info!(path, "profile database opened");
        Ok(db)
    }

    /// Private in-memory database, mostly for tests.
    pub async fn open_in_memory() -> Result<Self, AegisError> {
        let conn = tokio_rusqlite::Connection::open_in_memory()
            .await
            .map_err(AegisError::storage)?;
        Self::init(conn, false).await
    }

    async fn init(conn: tokio_rusqlite::Connection, wal: bool) -> Result<Self, AegisError> {
        conn.call(
            move |conn| -> Result<Result<(), AegisError>, rusqlite::Error> {
                if wal {
                    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
                }
                conn.execute_batch("PRAGMA foreign_keys=ON;")?;
                conn.busy_timeout(std::time::Duration::from_secs(5))?;
                Ok(run_migrations(conn))
            },
        )
        .await
        .map_err(map_tr_err)??;
        debug!("database ready");
        Ok(Self { conn })
    }

    /// The underlying connection, for query modules.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Close the connection, flushing pending work.
    pub async fn close(self) -> Result<(), AegisError> {
        self.conn.close().await.map_err(map_tr_err)
    }
}

/// Convert a tokio-rusqlite error into [`AegisError::Storage`].
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> AegisError {
    AegisError::storage(e)
}
