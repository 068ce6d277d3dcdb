//! secret-sync - Centralized secret synchronization between repositories.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use secret_sync::cli::output;
use secret_sync::cli::{execute, Cli};
use secret_sync::core::constants::env;
use secret_sync::error::{CatalogError, CheckError, ConfigError, Error, PlatformError};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = execute(cli.command, cli.config) {
        output::error(&e.to_string());
        if let Some(hint) = hint(&e) {
            output::error_hint(hint);
        }
        std::process::exit(exit_code(&e));
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env(env::LOG).unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("secret_sync=debug")
        } else {
            EnvFilter::new("secret_sync=warn")
        }
    });

    let json = std::env::var(env::LOG_FORMAT).is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .without_time()
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn hint(e: &Error) -> Option<&'static str> {
    match e {
        Error::Config(ConfigError::NoToken) => Some("export GH_TOKEN with access to the repository"),
        Error::Config(ConfigError::NoSourceRepo) => {
            Some("set source.repo in .secret-sync.toml or SECRET_SYNC_SOURCE_REPO")
        }
        Error::Config(ConfigError::UnknownRepository) => {
            Some("run inside a git checkout with an origin remote, or set GITHUB_REPOSITORY")
        }
        Error::Catalog(CatalogError::Missing) => {
            Some("run from the source repository's workflow, or pass --catalog FILE")
        }
        Error::Platform(PlatformError::Unauthorized) => {
            Some("check that the token can manage repository secrets")
        }
        Error::Check(CheckError::MissingSecrets { .. }) => {
            Some("follow one of the steps above, then re-run the pipeline")
        }
        Error::SyncFailures { .. } => Some("retry the failed names once the cause is fixed"),
        _ => None,
    }
}

fn exit_code(e: &Error) -> i32 {
    match e {
        Error::SyncFailures { .. } => 2,
        _ => 1,
    }
}
