// SPDX-FileCopyrightText: 2026 Aegis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `aegis check` command implementation.
//!
//! Runs startup diagnostics: passphrase, engine self-test, database schema,
//! and whether stored credentials decrypt with the current passphrase.

use std::io::IsTerminal;
use std::sync::Arc;
use std::time::{Duration, Instant};

use aegis_config::AegisConfig;
use aegis_core::AegisError;
use aegis_storage::Database;
use aegis_storage::queries::profiles;
use aegis_vault::{EncryptedFieldConverter, EncryptionEngine, validate_passphrase};
use secrecy::{ExposeSecret, SecretString};

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub duration: Duration,
}

impl CheckResult {
    fn new(name: &str, status: CheckStatus, message: impl Into<String>, start: Instant) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: message.into(),
            duration: start.elapsed(),
        }
    }
}

/// Run every check and print a report. Returns `true` when nothing failed.
pub async fn run_check(
    config: &AegisConfig,
    passphrase: Option<&SecretString>,
    plain: bool,
) -> Result<bool, AegisError> {
    let use_color = !plain && std::io::stdout().is_terminal();
    let results = collect_results(config, passphrase).await;

    println!();
    println!("  aegis check");
    println!("  {}", "-".repeat(50));

    for result in &results {
        println!("{}", format_line(result, use_color));
    }
    println!();

    let failures = results
        .iter()
        .filter(|r| r.status == CheckStatus::Fail)
        .count();
    let warnings = results
        .iter()
        .filter(|r| r.status == CheckStatus::Warn)
        .count();

    if failures + warnings == 0 {
        println!("  All checks passed.");
    } else {
        let issues = failures + warnings;
        let issue_word = if issues == 1 { "issue" } else { "issues" };
        println!("  {issues} {issue_word} found.");
    }
    println!();

    Ok(failures == 0)
}

/// Run the checks without printing.
pub async fn collect_results(
    config: &AegisConfig,
    passphrase: Option<&SecretString>,
) -> Vec<CheckResult> {
    let mut results = vec![check_passphrase(passphrase)];

    let engine = match EncryptionEngine::initialize(passphrase) {
        Ok(engine) => Arc::new(engine),
        Err(_) => return results,
    };
    results.push(check_engine(&engine));
    results.extend(check_database(&config.storage.database_path, engine).await);
    results
}

fn check_passphrase(passphrase: Option<&SecretString>) -> CheckResult {
    let start = Instant::now();
    match validate_passphrase(passphrase.map(|p| p.expose_secret())) {
        Ok(()) => CheckResult::new("Passphrase", CheckStatus::Pass, "configured", start),
        Err(e) => CheckResult::new("Passphrase", CheckStatus::Fail, e.to_string(), start),
    }
}

/// Encrypt and decrypt a sample value.
fn check_engine(engine: &EncryptionEngine) -> CheckResult {
    let start = Instant::now();
    let sample = "aegis-self-test";
    let outcome = engine
        .encrypt_str(sample)
        .and_then(|payload| engine.decrypt_str(&payload));

    match outcome {
        Ok(value) if value == sample => {
            CheckResult::new("Encryption", CheckStatus::Pass, "AES-256-GCM round trip ok", start)
        }
        Ok(_) => CheckResult::new("Encryption", CheckStatus::Fail, "round trip mismatch", start),
        Err(e) => CheckResult::new("Encryption", CheckStatus::Fail, e.to_string(), start),
    }
}

async fn check_database(db_path: &str, engine: Arc<EncryptionEngine>) -> Vec<CheckResult> {
    let start = Instant::now();

    if !std::path::Path::new(db_path).exists() {
        return vec![CheckResult::new(
            "Database",
            CheckStatus::Warn,
            format!("not found: {db_path} (created on first use)"),
            start,
        )];
    }

    let db = match Database::open(db_path).await {
        Ok(db) => db,
        Err(e) => {
            return vec![CheckResult::new(
                "Database",
                CheckStatus::Fail,
                format!("open failed: {e}"),
                start,
            )];
        }
    };
    let mut results = vec![CheckResult::new(
        "Database",
        CheckStatus::Pass,
        "schema up to date",
        start,
    )];

    let start = Instant::now();
    let converter = EncryptedFieldConverter::new(engine);
    let stored = match profiles::list_all_profiles(&db).await {
        Ok(rows) => {
            let total = rows.len();
            let unreadable = rows
                .iter()
                .filter(|row| {
                    row.sealed()
                        .and_then(|sealed| sealed.open(&converter))
                        .is_err()
                })
                .count();
            if unreadable == 0 {
                CheckResult::new(
                    "Stored secrets",
                    CheckStatus::Pass,
                    format!("{total} credential(s) readable"),
                    start,
                )
            } else {
                CheckResult::new(
                    "Stored secrets",
                    CheckStatus::Fail,
                    format!("{unreadable} of {total} credential(s) cannot be decrypted with this passphrase"),
                    start,
                )
            }
        }
        Err(e) => CheckResult::new("Stored secrets", CheckStatus::Fail, e.to_string(), start),
    };
    results.push(stored);

    if let Err(e) = db.close().await {
        tracing::warn!(error = %e, "failed to close database after check");
    }
    results
}

fn format_line(result: &CheckResult, use_color: bool) -> String {
    let duration_ms = result.duration.as_millis();
    if use_color {
        use colored::Colorize;
        let (symbol, message) = match result.status {
            CheckStatus::Pass => ("✓".green().to_string(), result.message.normal()),
            CheckStatus::Warn => ("!".yellow().to_string(), result.message.yellow()),
            CheckStatus::Fail => ("✗".red().to_string(), result.message.red()),
        };
        format!("    {symbol} {:<16} {message} ({duration_ms}ms)", result.name)
    } else {
        let tag = match result.status {
            CheckStatus::Pass => "[OK]  ",
            CheckStatus::Warn => "[WARN]",
            CheckStatus::Fail => "[FAIL]",
        };
        format!("    {tag} {:<16} {} ({duration_ms}ms)", result.name, result.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aegis_credentials::{AuthProfile, BearerToken};
    use aegis_storage::ProfileStore;
    use tempfile::tempdir;

    fn secret(value: &str) -> SecretString {
        SecretString::from(value.to_string())
    }

    fn config_with_db(path: &str) -> AegisConfig {
        let mut config = AegisConfig::default();
        config.storage.database_path = path.to_string();
        config
    }

    #[tokio::test]
    async fn missing_passphrase_stops_after_first_check() {
        let config = config_with_db("/nonexistent/aegis.db");
        let results = collect_results(&config, None).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status, CheckStatus::Fail);
        assert!(results[0].message.contains("not configured"));
    }

    #[tokio::test]
    async fn missing_database_is_a_warning() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.db");
        let config = config_with_db(path.to_str().unwrap());

        let results = collect_results(&config, Some(&secret("check-test-passphrase-01"))).await;
        let statuses: Vec<_> = results.iter().map(|r| r.status.clone()).collect();
        assert_eq!(
            statuses,
            vec![CheckStatus::Pass, CheckStatus::Pass, CheckStatus::Warn]
        );
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn wrong_passphrase_flags_stored_secrets() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("aegis.db");
        let path = path.to_str().unwrap();

        let writer = Arc::new(EncryptionEngine::initialize(Some(&secret("original-passphrase-01"))).unwrap());
        let store = ProfileStore::new(
            Database::open(path).await.unwrap(),
            EncryptedFieldConverter::new(writer),
        );
        store
            .save(&AuthProfile::new(1, "api", BearerToken::new("abc123")))
            .await
            .unwrap();
        store.close().await.unwrap();

        let config = config_with_db(path);
        let good = collect_results(&config, Some(&secret("original-passphrase-01"))).await;
        assert!(good.iter().all(|r| r.status == CheckStatus::Pass));

        let bad = collect_results(&config, Some(&secret("rotated-passphrase-02"))).await;
        let stored = bad.iter().find(|r| r.name == "Stored secrets").unwrap();
        assert_eq!(stored.status, CheckStatus::Fail);
        assert!(stored.message.starts_with("1 of 1"));
    }

    #[test]
    fn plain_lines_use_bracket_tags() {
        let result = CheckResult {
            name: "Database".into(),
            status: CheckStatus::Warn,
            message: "not found".into(),
            duration: Duration::from_millis(3),
        };
        let line = format_line(&result, false);
        assert!(line.contains("[WARN]"));
        assert!(line.contains("not found (3ms)"));
    }
}
