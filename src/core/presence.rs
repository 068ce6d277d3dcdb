//! Presence checking.
//!
//! Determines which required secrets a repository already has, using only
//! the platform's listing query, and builds the remediation steps shown
//! when some are missing.

use tracing::debug;

use crate::core::config::Config;
use crate::core::domain::PresenceReport;
use crate::core::platform::SecretStore;
use crate::core::types::{RepositoryRef, SecretName};
use crate::error::PlatformError;

/// Partition `required` into names present in and missing from `repo`.
///
/// # Errors
///
/// Returns `PlatformError` if the listing query fails.
pub async fn check(
    store: &dyn SecretStore,
    repo: &RepositoryRef,
    required: &[SecretName],
) -> Result<PresenceReport, PlatformError> {
    let existing = store.list(repo).await?;
    debug!(repo = %repo, existing = existing.len(), required = required.len(), "checking presence");

    let (present, missing): (Vec<_>, Vec<_>) = required
        .iter()
        .cloned()
        .partition(|name| existing.contains(name));

    Ok(PresenceReport {
        repo: repo.clone(),
        present,
        missing,
    })
}

/// Ways to get missing secrets into a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remediation {
    /// Dispatcher workflow page in the source repository
    pub workflow_url: Option<String>,
    /// Platform CLI invocation triggering the dispatcher
    pub workflow_command: Option<String>,
    /// Direct invocation, for operators running inside the source pipeline
    pub sync_command: String,
    /// Manual secret entry page of the target repository
    pub manual_url: String,
}

impl Remediation {
    /// Build remediation steps for `report`, pre-filled with its repository
    /// and missing names.
    pub fn new(config: &Config, source: Option<&RepositoryRef>, report: &PresenceReport) -> Self {
        let target = &report.repo;
        let names = report.missing_list();
        let workflow = &config.source.workflow;

        Self {
            workflow_url: source.map(|source| {
                format!(
                    "{}/{}/actions/workflows/{}",
                    config.web_url(),
                    source,
                    workflow
                )
            }),
            workflow_command: source.map(|source| {
                format!(
                    "gh workflow run {} --repo {} -f target_repo={} -f secrets=\"{}\"",
                    workflow, source, target, names
                )
            }),
            sync_command: format!(
                "secret-sync sync --target {} --secrets \"{}\"",
                target, names
            ),
            manual_url: format!("{}/{}/settings/secrets/actions", config.web_url(), target),
        }
    }
}
