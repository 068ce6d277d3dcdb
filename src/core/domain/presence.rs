//! Result of a presence check.

use crate::core::types::{RepositoryRef, SecretName};

/// Required names split into present and missing, in request order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceReport {
    pub repo: RepositoryRef,
    pub present: Vec<SecretName>,
    pub missing: Vec<SecretName>,
}

impl PresenceReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Missing names joined with spaces, ready for a sync invocation.
    pub fn missing_list(&self) -> String {
        self.missing
            .iter()
            .map(SecretName::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}
