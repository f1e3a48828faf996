//! CLI command implementations
//!
//! Boot sequence shared by every command:
//! 1. Configuration load
//! 2. Database open (file created if missing)
//! 3. Schema creation (tables created if missing)
//!
//! `serve` then starts the HTTP server and runs until Ctrl-C.

use std::path::Path;

use serde_json::json;

use crate::http_server::HttpServer;
use crate::observability::{Event, Logger, ObservationScope};
use crate::store::{table_names, Store};

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Serve { config } => serve(&config),
        Command::Check { config } => check(&config),
    }
}

/// Write a default config file and create the database it points at
pub fn init(config_path: &Path) -> CliResult<()> {
    if config_path.exists() {
        return Err(CliError::already_initialized(config_path));
    }

    let config = Config::default();
    config.write(config_path)?;

    block_on(async {
        let store = open_store(&config).await?;
        store.close().await;
        Ok(())
    })?;

    write_response(json!({
        "initialized": true,
        "config": config_path.display().to_string(),
        "database_url": config.database_url,
    }))
}

/// Validate the config and prepare the database without serving
pub fn check(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;

    block_on(async {
        let store = open_store(&config).await?;
        store.close().await;
        Ok(())
    })?;

    write_response(json!({
        "database_url": config.database_url,
        "tables": table_names(),
        "listen": config.http.socket_addr(),
    }))
}

/// Boot and serve HTTP until interrupted
pub fn serve(config_path: &Path) -> CliResult<()> {
    Logger::event(Event::BootStart, &[]);
    let config = load_config(config_path).map_err(boot_failure)?;

    block_on(async move {
        let store = open_store(&config).await.map_err(boot_failure)?;
        Logger::event(Event::BootComplete, &[]);

        let server = HttpServer::new(store.clone(), config.http.clone());
        let result = server.serve(shutdown_signal()).await;

        store.close().await;
        Logger::event(Event::ShutdownComplete, &[]);

        result.map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

fn boot_failure(err: CliError) -> CliError {
    Logger::event(
        Event::BootFailed,
        &[("code", err.code_str()), ("reason", err.message())],
    );
    err
}

fn load_config(config_path: &Path) -> CliResult<Config> {
    let config = Config::load(config_path)?;
    Logger::event(
        Event::ConfigLoaded,
        &[
            ("config", config_path.display().to_string().as_str()),
            ("database_url", config.database_url.as_str()),
        ],
    );
    Ok(config)
}

async fn open_store(config: &Config) -> CliResult<Store> {
    let scope = ObservationScope::with_fields("SCHEMA", &[("database_url", config.database_url.as_str())]);

    match Store::open(&config.store_config()).await {
        Ok(store) => {
            scope.complete();
            Logger::event(Event::SchemaReady, &[]);
            Ok(store)
        }
        Err(e) => {
            scope.fail(&e.to_string());
            Err(e.into())
        }
    }
}

fn block_on<F>(future: F) -> CliResult<()>
where
    F: std::future::Future<Output = CliResult<()>>,
{
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;
    rt.block_on(future)
}

async fn shutdown_signal() {
    // If the handler cannot be installed, serve until the process is killed.
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
    Logger::event(Event::ShutdownStart, &[]);
}
