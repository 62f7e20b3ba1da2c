// SPDX-FileCopyrightText: 2026 Aegis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Aegis - encrypted credential storage for API auth profiles.
//!
//! This is the operator CLI: startup checks, ad-hoc encryption, and profile
//! management against the configured database.

mod check;
mod input;
mod profile;

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use aegis_config::{AegisConfig, ConfigError};
use aegis_core::AegisError;
use aegis_security::{KnownSecrets, RedactingWriter};
use aegis_storage::{Database, ProfileStore};
use aegis_vault::{EncryptedFieldConverter, EncryptionEngine, resolve_passphrase_interactive};
use clap::{Parser, Subcommand};

/// Aegis - encrypted credential storage for API auth profiles.
#[derive(Parser, Debug)]
#[command(name = "aegis", version, about, long_about = None)]
struct Cli {
    /// Load this config file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Verify the passphrase, the engine, and stored credentials.
    Check {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
    /// Encrypt a value and print the Base64 payload (reads stdin if omitted).
    Encrypt { value: Option<String> },
    /// Decrypt a Base64 payload (reads stdin if omitted).
    Decrypt { value: Option<String> },
    /// Manage auth profiles.
    Profile {
        /// Environment the profile belongs to.
        #[arg(long = "env", default_value_t = 1)]
        environment: i64,

        #[command(subcommand)]
        command: ProfileCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ProfileCommand {
    /// Add a Bearer token profile (prompts for the token if omitted).
    AddBearer {
        name: String,
        #[arg(long)]
        token: Option<String>,
    },
    /// Add a Basic auth profile (prompts for the password if omitted).
    AddBasic {
        name: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: Option<String>,
    },
    /// Print the Authorization header value for a profile.
    Header { name: String },
    /// List profiles in the environment.
    List,
    /// Remove a profile and its credentials.
    Remove { name: String },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            aegis_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let known_secrets: KnownSecrets = Arc::new(RwLock::new(Vec::new()));
    init_tracing(&config.log.level, known_secrets.clone());

    match run(cli.command, &config, &known_secrets).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<AegisConfig, Vec<ConfigError>> {
    match path {
        Some(path) => aegis_config::load_and_validate_path(path),
        None => aegis_config::load_and_validate(),
    }
}

/// Returns `Ok(false)` when the command ran but reported failure.
async fn run(
    command: Commands,
    config: &AegisConfig,
    known_secrets: &KnownSecrets,
) -> Result<bool, AegisError> {
    match command {
        Commands::Check { plain } => {
            let passphrase = resolve_passphrase_interactive(&config.encryption)?;
            if let Some(passphrase) = &passphrase {
                RedactingWriter::<std::io::Stderr>::add_secret(known_secrets, passphrase);
            }
            check::run_check(config, passphrase.as_ref(), plain).await
        }
        Commands::Encrypt { value } => {
            let engine = build_engine(config, known_secrets)?;
            let plaintext = input::value_or_stdin(value)?;
            println!("{}", engine.encrypt_str(&plaintext)?);
            Ok(true)
        }
        Commands::Decrypt { value } => {
            let engine = build_engine(config, known_secrets)?;
            let payload = input::value_or_stdin(value)?;
            println!("{}", engine.decrypt_str(payload.trim())?);
            Ok(true)
        }
        Commands::Profile {
            environment,
            command,
        } => {
            let engine = build_engine(config, known_secrets)?;
            let db = Database::open(&config.storage.database_path).await?;
            let store = ProfileStore::new(db, EncryptedFieldConverter::new(engine));
            let outcome = run_profile(&store, environment, command).await;
            store.close().await?;
            outcome.map(|()| true)
        }
    }
}

async fn run_profile(
    store: &ProfileStore,
    environment: i64,
    command: ProfileCommand,
) -> Result<(), AegisError> {
    match command {
        ProfileCommand::AddBearer { name, token } => {
            let id = profile::add_bearer(store, environment, &name, token).await?;
            println!("added profile '{name}' (id {id})");
        }
        ProfileCommand::AddBasic {
            name,
            username,
            password,
        } => {
            let id = profile::add_basic(store, environment, &name, username, password).await?;
            println!("added profile '{name}' (id {id})");
        }
        ProfileCommand::Header { name } => {
            println!("{}", profile::header(store, environment, &name).await?);
        }
        ProfileCommand::List => {
            for line in profile::list(store, environment).await? {
                println!("{line}");
            }
        }
        ProfileCommand::Remove { name } => {
            profile::remove(store, environment, &name).await?;
            println!("removed profile '{name}'");
        }
    }
    Ok(())
}

/// Resolve the passphrase, register it for log redaction, and build the engine.
fn build_engine(
    config: &AegisConfig,
    known_secrets: &KnownSecrets,
) -> Result<Arc<EncryptionEngine>, AegisError> {
    let passphrase = resolve_passphrase_interactive(&config.encryption)?;
    if let Some(passphrase) = &passphrase {
        RedactingWriter::<std::io::Stderr>::add_secret(known_secrets, passphrase);
    }
    Ok(Arc::new(EncryptionEngine::initialize(passphrase.as_ref())?))
}

/// Initialize the tracing subscriber. Everything written goes through the
/// redacting writer.
fn init_tracing(log_level: &str, known_secrets: KnownSecrets) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("aegis={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(move || RedactingWriter::new(std::io::stderr(), known_secrets.clone()))
        .init();
}
