//! Execution context detection.
//!
//! Decides whether we run inside an automated pipeline or at a developer's
//! terminal, and which repository we are running for. The repository is
//! taken from the platform's own environment or the local git remote, never
//! from a command-line argument.

use std::process::{Command, Stdio};
use tracing::debug;

use crate::core::constants::env;
use crate::core::types::RepositoryRef;
use crate::core::validation;
use crate::error::{ConfigError, Result};

/// Where the current invocation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionContext {
    /// Automated pipeline: missing secrets are fatal.
    Ci,
    /// Developer terminal: missing secrets are a warning.
    Interactive,
}

impl ExecutionContext {
    /// Detect the context from the process environment.
    pub fn detect() -> Self {
        Self::detect_with(|key| std::env::var(key).ok())
    }

    /// Detect the context through `lookup`.
    pub fn detect_with(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let flagged = |key: &str| {
            lookup(key)
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1"))
                .unwrap_or(false)
        };

        if flagged(env::CI) || flagged(env::ACTIONS) {
            Self::Ci
        } else {
            Self::Interactive
        }
    }

    /// Resolve explicit `--ci` / `--local` flags, falling back to detection.
    pub fn resolve(ci: bool, local: bool) -> Self {
        match (ci, local) {
            (true, _) => Self::Ci,
            (false, true) => Self::Interactive,
            (false, false) => Self::detect(),
        }
    }

    pub fn is_ci(self) -> bool {
        self == Self::Ci
    }
}

/// The repository the current pipeline or checkout belongs to.
///
/// # Errors
///
/// Returns `ConfigError::UnknownRepository` if neither the platform
/// environment nor the `origin` remote identify one.
pub fn current_repository() -> Result<RepositoryRef> {
    if let Some(repo) = std::env::var(env::REPOSITORY)
        .ok()
        .filter(|r| !r.trim().is_empty())
    {
        debug!(repo = %repo, "repository from platform environment");
        return Ok(validation::parse_repository(&repo)?);
    }

    let url = origin_url().ok_or(ConfigError::UnknownRepository)?;
    debug!(url = %url, "repository from git remote");
    parse_remote_url(&url).ok_or_else(|| ConfigError::UnknownRepository.into())
}

fn origin_url() -> Option<String> {
    let output = Command::new("git")
        .args(["remote", "get-url", "origin"])
        .stderr(Stdio::null())
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!url.is_empty()).then_some(url)
}

/// Extract `org/name` from an https or ssh remote URL.
pub fn parse_remote_url(url: &str) -> Option<RepositoryRef> {
    let url = url.trim();

    let path = if let Some(rest) = url.strip_prefix("git@") {
        // git@host:org/name.git
        rest.split_once(':')?.1
    } else if let Some((_, rest)) = url.split_once("://") {
        // https://host/org/name.git, ssh://git@host/org/name.git
        rest.split_once('/')?.1
    } else {
        return None;
    };

    let path = path.trim_end_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);
    validation::parse_repository(path).ok()
}
