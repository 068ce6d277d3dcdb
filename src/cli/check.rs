//! Presence check command.
//!
//! Lists the current repository's secrets and reports which required names
//! are missing. Missing names fail the command in CI and only warn at a
//! developer's terminal.

use tracing::{debug, warn};

use crate::cli::output;
use crate::core::config::Config;
use crate::core::context::{self, ExecutionContext};
use crate::core::domain::PresenceReport;
use crate::core::platform::GitHub;
use crate::core::presence::{self, Remediation};
use crate::core::types::SecretName;
use crate::core::validation;
use crate::error::{CheckError, Error, Result};

/// Check that every name in `names` exists in the current repository.
pub fn execute(config: &Config, names: &[String], ci: bool, local: bool) -> Result<()> {
    let required = validation::parse_name_args(names)?;
    let context = ExecutionContext::resolve(ci, local);
    debug!(?context, required = required.len(), "presence check");

    let report = match run(config, &required) {
        Ok(report) => report,
        Err(e) if !context.is_ci() => {
            warn!(error = %e, "presence check could not run");
            output::warn(&format!("could not check secrets: {}", e));
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    for name in &required {
        if report.missing.contains(name) {
            output::failure(&format!("{} missing", name));
        } else {
            output::success(&format!("{} present", name));
        }
    }

    if report.is_complete() {
        return Ok(());
    }

    print_remediation(config, &report);

    if context.is_ci() {
        return Err(CheckError::MissingSecrets {
            missing: report.missing.iter().map(ToString::to_string).collect(),
        }
        .into());
    }

    println!();
    output::warn(&format!(
        "{} required secret(s) missing; continuing outside CI",
        report.missing.len()
    ));
    Ok(())
}

fn run(config: &Config, required: &[SecretName]) -> Result<PresenceReport> {
    let repo = context::current_repository()?;
    let store = GitHub::from_config(config)?;
    let runtime = super::runtime()?;
    runtime
        .block_on(presence::check(&store, &repo, required))
        .map_err(Error::from)
}

fn print_remediation(config: &Config, report: &PresenceReport) {
    let source = config.source_repo().ok();
    let steps = Remediation::new(config, source.as_ref(), report);

    output::section("Missing secrets");
    match (&steps.workflow_command, &steps.workflow_url) {
        (Some(command), Some(url)) => {
            println!("Run the sync workflow in the source repository:");
            println!("  {}", output::cmd(command));
            output::dimmed(&format!("  {}", url));
        }
        _ => output::hint("set source.repo in .secret-sync.toml to get a workflow command"),
    }
    println!();
    println!("Or, from the source repository's pipeline:");
    println!("  {}", output::cmd(&steps.sync_command));
    println!();
    println!("Or add them by hand:");
    println!("  {}", steps.manual_url);
}
