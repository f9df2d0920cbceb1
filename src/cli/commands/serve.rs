//! Serve command - opens the database and runs the REST API

use std::net::IpAddr;
use std::path::PathBuf;

use crate::api::{self, Config};
use crate::cli::error::CliResult;
use crate::db::{Database, SqliteDatabase};

/// Flags accepted by `mrello serve`. Unset flags fall back to the environment.
#[derive(Debug, Default)]
pub struct ServeOptions {
    pub host: Option<IpAddr>,
    pub port: Option<u16>,
    pub db: Option<PathBuf>,
    pub webhook_secret: Option<String>,
    pub enable_docs: bool,
    pub verbosity: u8,
}

/// Layer command-line flags over the environment-derived config.
pub fn build_config(options: ServeOptions) -> Config {
    let mut config = Config::new()
        .with_verbosity(options.verbosity)
        .with_docs(options.enable_docs);

    if let Some(host) = options.host {
        config = config.with_host(host);
    }
    if let Some(port) = options.port {
        config = config.with_port(port);
    }
    if let Some(db) = options.db {
        config = config.with_db_path(db);
    }
    if let Some(secret) = options.webhook_secret.filter(|s| !s.is_empty()) {
        config = config.with_webhook_secret(secret);
    }
    config
}

/// Run the API server
pub async fn run(options: ServeOptions) -> CliResult<()> {
    let config = build_config(options);

    println!("Opening database at {:?}", config.db_path);

    // Ensure parent directory exists
    if let Some(parent) = config.db_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let db = SqliteDatabase::open(&config.db_path).await?;
    db.migrate().await?;
    println!("Database migrations complete");

    // Banner goes out before logging is initialized
    println!();
    println!("mrello API server starting...");
    println!("   API:      http://{}/api/v1", config.addr());
    if config.enable_docs {
        println!("   Docs:     http://{}/docs", config.addr());
    }
    println!("   Database: {}", config.db_path.display());
    println!();

    api::init_tracing(config.verbosity);
    api::run(config, db).await?;

    Ok(())
}
