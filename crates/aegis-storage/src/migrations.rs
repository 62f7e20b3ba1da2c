// SPDX-FileCopyrightText: 2026 Aegis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedded database migrations using refinery.
//!
//! SQL files under `migrations/` are compiled into the binary via
//! `embed_migrations!` and applied on every database open.

use aegis_core::AegisError;
use tracing::info;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Run all pending migrations against the given connection.
///
/// Refinery tracks applied migrations in its own `refinery_schema_history`
/// table, so PRAGMA values such as `user_version` play no part.
pub fn run_migrations(conn: &mut rusqlite::Connection) -> Result<(), AegisError> {
    let report = embedded::migrations::runner()
        .run(conn)
        .map_err(AegisError::storage)?;
    let applied = report.applied_migrations().len();
    if applied > 0 {
        info!(applied, "applied schema migrations");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names(conn: &rusqlite::Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap()
    }

    fn history_len(conn: &rusqlite::Connection) -> i64 {
        conn.query_row("SELECT COUNT(*) FROM refinery_schema_history", [], |row| {
            row.get(0)
        })
        .unwrap()
    }

    #[test]
    fn fresh_database_gets_full_schema() {
        let mut conn = rusqlite::Connection::open_in_memory().unwrap();
        run_migrations(&mut conn).unwrap();

        let tables = table_names(&conn);
        assert!(tables.contains(&"auth_credentials".to_string()));
        assert!(tables.contains(&"auth_profiles".to_string()));
        assert_eq!(history_len(&conn), 1);
    }

    #[test]
    fn migrations_are_idempotent() {
        let mut conn = rusqlite::Connection::open_in_memory().unwrap();
        run_migrations(&mut conn).unwrap();
        run_migrations(&mut conn).unwrap();
        assert_eq!(history_len(&conn), 1);
    }

    #[test]
    fn stray_user_version_does_not_skip_schema() {
        for version in [-1, 99] {
            let mut conn = rusqlite::Connection::open_in_memory().unwrap();
            conn.pragma_update(None, "user_version", version).unwrap();
            run_migrations(&mut conn).unwrap();

            let tables = table_names(&conn);
            assert!(
                tables.contains(&"auth_credentials".to_string()),
                "user_version {version}"
            );
            assert!(
                tables.contains(&"auth_profiles".to_string()),
                "user_version {version}"
            );
        }
    }
}
