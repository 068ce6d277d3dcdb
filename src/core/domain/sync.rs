//! Sync request, per-name outcome and the aggregated report.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use crate::core::types::{RepositoryRef, SecretName};
use crate::core::validation;
use crate::error::ValidationError;

/// One request to copy secrets into a target repository.
///
/// Exists for the duration of a single dispatcher run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRequest {
    pub target: RepositoryRef,
    /// Distinct names, in the order they were requested
    pub names: Vec<SecretName>,
}

impl SyncRequest {
    /// Validate raw invocation parameters.
    ///
    /// `secrets` is a whitespace- or comma-delimited list.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for an empty or malformed target, an empty
    /// name list, or an invalid name. Nothing is dispatched in that case.
    pub fn parse(target: &str, secrets: &str) -> Result<Self, ValidationError> {
        let target = validation::parse_repository(target)?;
        let names = validation::parse_name_list(secrets)?;
        Ok(Self { target, names })
    }
}

/// What happened to one requested name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeResult {
    /// Written to the target.
    Synced,
    /// Would have been written (dry run).
    WouldSync,
    /// Not attempted because of policy.
    Skipped(String),
    /// Not attempted because the source has no value.
    Warned(String),
    /// The write failed.
    Failed(String),
}

impl OutcomeResult {
    /// Short label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Synced => "synced",
            Self::WouldSync => "would sync",
            Self::Skipped(_) => "skipped",
            Self::Warned(_) => "warning",
            Self::Failed(_) => "failed",
        }
    }

    /// Reason for non-synced outcomes.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Synced | Self::WouldSync => None,
            Self::Skipped(r) | Self::Warned(r) | Self::Failed(r) => Some(r),
        }
    }
}

/// Outcome for a single requested name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    pub name: SecretName,
    pub result: OutcomeResult,
}

impl SyncOutcome {
    pub fn new(name: SecretName, result: OutcomeResult) -> Self {
        Self { name, result }
    }
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.result.label())?;
        if let Some(reason) = self.result.reason() {
            write!(f, " ({})", reason)?;
        }
        Ok(())
    }
}

/// Outcome counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub synced: usize,
    pub would_sync: usize,
    pub skipped: usize,
    pub warnings: usize,
    pub failed: usize,
}

impl fmt::Display for Counts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Summary: {} synced, {} skipped, {} warning{}, {} failed",
            self.synced,
            self.skipped,
            self.warnings,
            if self.warnings == 1 { "" } else { "s" },
            self.failed
        )?;
        if self.would_sync > 0 {
            write!(f, ", {} would sync", self.would_sync)?;
        }
        Ok(())
    }
}

/// Report of one dispatcher run, one outcome per requested name in
/// request order.
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub target: RepositoryRef,
    pub outcomes: Vec<SyncOutcome>,
    pub dry_run: bool,
    pub generated_at: DateTime<Utc>,
}

impl SyncReport {
    pub fn new(target: RepositoryRef, outcomes: Vec<SyncOutcome>, dry_run: bool) -> Self {
        Self {
            target,
            outcomes,
            dry_run,
            generated_at: Utc::now(),
        }
    }

    pub fn counts(&self) -> Counts {
        let mut counts = Counts::default();
        for outcome in &self.outcomes {
            match outcome.result {
                OutcomeResult::Synced => counts.synced += 1,
                OutcomeResult::WouldSync => counts.would_sync += 1,
                OutcomeResult::Skipped(_) => counts.skipped += 1,
                OutcomeResult::Warned(_) => counts.warnings += 1,
                OutcomeResult::Failed(_) => counts.failed += 1,
            }
        }
        counts
    }

    pub fn has_failures(&self) -> bool {
        self.outcomes
            .iter()
            .any(|o| matches!(o.result, OutcomeResult::Failed(_)))
    }

    /// Outcome for `name`, if it was requested.
    pub fn outcome(&self, name: &str) -> Option<&OutcomeResult> {
        self.outcomes
            .iter()
            .find(|o| o.name.as_str() == name)
            .map(|o| &o.result)
    }

    /// Machine-readable form.
    pub fn to_json(&self) -> serde_json::Result<String> {
        #[derive(Serialize)]
        struct Entry<'a> {
            name: &'a SecretName,
            result: &'static str,
            #[serde(skip_serializing_if = "Option::is_none")]
            reason: Option<&'a str>,
        }

        #[derive(Serialize)]
        struct Json<'a> {
            target: &'a RepositoryRef,
            dry_run: bool,
            generated_at: String,
            outcomes: Vec<Entry<'a>>,
            counts: Counts,
        }

        serde_json::to_string_pretty(&Json {
            target: &self.target,
            dry_run: self.dry_run,
            generated_at: self.generated_at.to_rfc3339(),
            outcomes: self
                .outcomes
                .iter()
                .map(|o| Entry {
                    name: &o.name,
                    result: o.result.label(),
                    reason: o.result.reason(),
                })
                .collect(),
            counts: self.counts(),
        })
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in &self.outcomes {
            writeln!(f, "{}", outcome)?;
        }
        write!(f, "{}", self.counts())
    }
}
