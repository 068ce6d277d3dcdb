//! Sync command.
//!
//! Validates the request, then hands it to the dispatcher running with the
//! source repository's own identity and prints one line per name.

use std::path::PathBuf;
use tracing::{debug, warn};

use crate::cli::output;
use crate::core::catalog::JsonCatalog;
use crate::core::config::Config;
use crate::core::dispatch::Dispatcher;
use crate::core::domain::{SyncReport, SyncRequest};
use crate::core::platform::{GitHub, Memory, SecretStore};
use crate::error::{Error, Result};

/// Sync command arguments.
pub struct Args {
    pub target: String,
    pub secrets: String,
    pub dry_run: bool,
    pub concurrency: Option<usize>,
    pub timeout: Option<u64>,
    pub catalog: Option<PathBuf>,
    pub json: bool,
}

/// Run a sync request.
///
/// The request is validated before configuration, catalog or platform are
/// touched, so a malformed request never reaches the dispatcher.
pub fn execute(args: Args, load: impl FnOnce() -> Result<Config>) -> Result<()> {
    let request = SyncRequest::parse(&args.target, &args.secrets)?;
    debug!(target = %request.target, names = request.names.len(), "sync request accepted");

    let mut config = load()?;
    if let Some(concurrency) = args.concurrency {
        config.sync.concurrency = concurrency;
    }
    if let Some(timeout) = args.timeout {
        config.sync.timeout_secs = timeout;
    }
    config.validate()?;

    let policy = config.policy()?;
    let catalog = JsonCatalog::load(args.catalog.as_deref())?;
    if catalog.is_empty() {
        warn!("source catalog holds no secrets");
    } else {
        debug!(entries = catalog.len(), "source catalog ready");
    }

    // dry runs never write, so they need no token
    let store: Box<dyn SecretStore> = if args.dry_run {
        Box::new(Memory::new())
    } else {
        Box::new(GitHub::from_config(&config)?)
    };

    let dispatcher = Dispatcher::new(&policy, &catalog, store.as_ref())
        .concurrency(config.concurrency())
        .timeout(config.timeout())
        .dry_run(args.dry_run);

    let report = super::runtime()?.block_on(dispatcher.run(&request));

    if args.json {
        let json = report
            .to_json()
            .map_err(|e| Error::Other(format!("failed to serialize report: {}", e)))?;
        println!("{}", json);
    } else {
        print_report(&report);
    }

    let counts = report.counts();
    if counts.failed > 0 {
        return Err(Error::SyncFailures {
            failed: counts.failed,
            total: report.outcomes.len(),
        });
    }
    Ok(())
}

fn print_report(report: &SyncReport) {
    if report.dry_run {
        output::header(&format!("Dry run for {}", report.target));
    } else {
        output::header(&format!("Syncing to {}", report.target));
    }
    println!("{}", report);
}
