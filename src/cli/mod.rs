//! CLI module for quizdb
//!
//! Provides command-line interface for:
//! - init: Write a default config and create the database
//! - serve: Boot and serve HTTP
//! - check: Validate config and database, then exit

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check, init, run, run_command, serve};
pub use config::{Config, ENV_DATABASE_URL, ENV_PORT};
pub use errors::{CliError, CliErrorCode, CliResult};
