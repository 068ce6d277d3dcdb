//! Protection policy.
//!
//! Partitions secret names into provisioning-only and syncable. The table
//! is explicit data: built-in entries plus additions from the config file.
//! Nothing is inferred from a name's shape or a value's contents.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::core::types::SecretName;

/// Infrastructure credentials that never leave the source repository.
pub const BUILTIN_PROVISIONING_ONLY: &[&str] = &[
    "KUBE_CONFIG",
    "KUBECONFIG",
    "KUBE_CONFIG_DATA",
    "K8S_CLUSTER_TOKEN",
    "CLUSTER_CA_CERT",
    "SSH_PRIVATE_KEY",
    "DEPLOY_SSH_KEY",
    "SSH_KNOWN_HOSTS",
    "SERVER_HOST",
    "SERVER_USER",
    "SERVER_IP",
    "HETZNER_API_TOKEN",
    "TERRAFORM_TOKEN",
    "ADMIN_GITHUB_TOKEN",
    "SECRET_SYNC_TOKEN",
];

/// Application credentials safe to copy into service repositories.
pub const BUILTIN_SYNCABLE: &[&str] = &[
    "REGISTRY_URL",
    "REGISTRY_USERNAME",
    "REGISTRY_PASSWORD",
    "DOCKER_USERNAME",
    "DOCKER_PASSWORD",
    "DATABASE_PASSWORD",
    "POSTGRES_PASSWORD",
    "REDIS_PASSWORD",
    "GIT_TOKEN",
    "NPM_TOKEN",
    "SENTRY_DSN",
];

/// Protection class of a secret name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProtectionClass {
    ProvisioningOnly,
    Syncable,
}

impl fmt::Display for ProtectionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProvisioningOnly => f.write_str("provisioning-only"),
            Self::Syncable => f.write_str("syncable"),
        }
    }
}

/// What to do with names the table does not list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownNames {
    /// Treat as provisioning-only.
    #[default]
    Deny,
    /// Treat as syncable.
    Allow,
}

/// Where a classification came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Source {
    Listed,
    Default,
}

/// The effective protection policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    provisioning_only: BTreeSet<String>,
    syncable: BTreeSet<String>,
    unknown: UnknownNames,
}

impl Policy {
    /// The built-in table with unknown names denied.
    pub fn builtin() -> Self {
        Self {
            provisioning_only: BUILTIN_PROVISIONING_ONLY
                .iter()
                .map(|s| s.to_string())
                .collect(),
            syncable: BUILTIN_SYNCABLE.iter().map(|s| s.to_string()).collect(),
            unknown: UnknownNames::Deny,
        }
    }

    /// Built-in table extended with extra entries.
    pub fn with_additions<'a>(
        provisioning_only: impl IntoIterator<Item = &'a SecretName>,
        syncable: impl IntoIterator<Item = &'a SecretName>,
        unknown: UnknownNames,
    ) -> Self {
        let mut policy = Self::builtin();
        policy
            .provisioning_only
            .extend(provisioning_only.into_iter().map(|n| n.to_string()));
        policy
            .syncable
            .extend(syncable.into_iter().map(|n| n.to_string()));
        policy.unknown = unknown;
        policy
    }

    /// Classify a name. Provisioning-only entries win over syncable ones.
    pub fn classify(&self, name: &SecretName) -> ProtectionClass {
        self.classify_with_source(name).0
    }

    /// Classify a name and report whether the table listed it.
    pub fn classify_with_source(&self, name: &SecretName) -> (ProtectionClass, Source) {
        if self.provisioning_only.contains(name.as_str()) {
            return (ProtectionClass::ProvisioningOnly, Source::Listed);
        }
        if self.syncable.contains(name.as_str()) {
            return (ProtectionClass::Syncable, Source::Listed);
        }
        let class = match self.unknown {
            UnknownNames::Deny => ProtectionClass::ProvisioningOnly,
            UnknownNames::Allow => ProtectionClass::Syncable,
        };
        (class, Source::Default)
    }

    /// Provisioning-only names, sorted.
    pub fn provisioning_only(&self) -> impl Iterator<Item = &str> {
        self.provisioning_only.iter().map(String::as_str)
    }

    /// Syncable names, sorted. Names also listed as provisioning-only are
    /// left out since they classify as provisioning-only.
    pub fn syncable(&self) -> impl Iterator<Item = &str> {
        self.syncable
            .iter()
            .filter(|n| !self.provisioning_only.contains(*n))
            .map(String::as_str)
    }

    pub fn unknown(&self) -> UnknownNames {
        self.unknown
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::builtin()
    }
}
