//! Command-line interface.

pub mod check;
pub mod completions;
pub mod output;
pub mod policy;
pub mod sync;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::core::config::Config;
use crate::core::constants::env;
use crate::error::{Error, Result};

/// secret-sync - Centralized secret synchronization between repositories.
#[derive(Parser)]
#[command(
    name = "secret-sync",
    about = "Centralized secret synchronization between source and service repositories",
    version
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a config file
    #[arg(long, global = true, env = env::CONFIG, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Check that required secrets exist in the current repository
    Check {
        /// Required secret names (space or comma separated)
        #[arg(required = true, value_name = "NAME")]
        names: Vec<String>,
        /// Fail when secrets are missing, regardless of environment
        #[arg(long, conflicts_with = "local")]
        ci: bool,
        /// Only warn when secrets are missing, regardless of environment
        #[arg(long)]
        local: bool,
    },

    /// Copy secrets from the source catalog to a target repository
    Sync {
        /// Target repository (org/name)
        #[arg(long, env = "TARGET_REPO", value_name = "ORG/NAME")]
        target: Option<String>,
        /// Secret names, space or comma separated
        #[arg(long, env = "SECRETS", value_name = "NAMES")]
        secrets: Option<String>,
        /// Classify and resolve without writing
        #[arg(long)]
        dry_run: bool,
        /// Maximum concurrent writes
        #[arg(long, value_name = "N")]
        concurrency: Option<usize>,
        /// Per-secret write timeout in seconds
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,
        /// Read source values from a JSON file instead of the environment
        #[arg(long, value_name = "FILE")]
        catalog: Option<PathBuf>,
        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the protection class of secret names
    Classify {
        /// Secret names
        #[arg(required = true, value_name = "NAME")]
        names: Vec<String>,
    },

    /// Show the effective protection policy
    Policy {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Shell type for completions.
#[derive(Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
}

/// Execute a parsed command.
pub fn execute(command: Command, config: Option<PathBuf>) -> Result<()> {
    let load = || Config::load(config.as_deref());

    match command {
        Command::Check { names, ci, local } => check::execute(&load()?, &names, ci, local),
        Command::Sync {
            target,
            secrets,
            dry_run,
            concurrency,
            timeout,
            catalog,
            json,
        } => sync::execute(
            sync::Args {
                target: target.unwrap_or_default(),
                secrets: secrets.unwrap_or_default(),
                dry_run,
                concurrency,
                timeout,
                catalog,
                json,
            },
            load,
        ),
        Command::Classify { names } => policy::classify(&load()?, &names),
        Command::Policy { json } => policy::show(&load()?, json),
        Command::Completions { shell } => completions::execute(shell),
    }
}

/// Build the runtime that drives platform calls for one command.
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::Other(format!("failed to start async runtime: {}", e)))
}
