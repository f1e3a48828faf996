//! CLI argument definitions using clap
//!
//! Commands:
//! - quizdb init --config <path>
//! - quizdb serve --config <path>
//! - quizdb check --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// quizdb - questions and multiple-choice answers over HTTP
#[derive(Parser, Debug)]
#[command(name = "quizdb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default configuration file and create the database
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./quizdb.json")]
        config: PathBuf,
    },

    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./quizdb.json")]
        config: PathBuf,
    },

    /// Validate the configuration, open the database and exit
    Check {
        /// Path to configuration file
        #[arg(long, default_value = "./quizdb.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
