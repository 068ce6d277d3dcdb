//! Configuration file management.
//!
//! Handles reading and validating `.secret-sync.toml`. A missing file is not
//! an error: every setting has a default except the source repository,
//! which is only required by commands that need it.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::core::constants::{self, env};
use crate::core::policy::{Policy, UnknownNames};
use crate::core::types::{RepositoryRef, SecretName};
use crate::core::validation;
use crate::error::{ConfigError, Error, Result};

/// Settings loaded from `.secret-sync.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub source: SourceConfig,
    pub platform: PlatformConfig,
    pub sync: SyncConfig,
    pub policy: PolicyConfig,
}

/// The repository hosting the dispatcher workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    /// `org/name` of the source repository
    pub repo: Option<String>,
    /// Dispatcher workflow file name
    pub workflow: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            repo: None,
            workflow: constants::DEFAULT_WORKFLOW.to_string(),
        }
    }
}

/// Hosting platform endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlatformConfig {
    pub api_url: String,
    pub web_url: String,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            api_url: constants::DEFAULT_API_URL.to_string(),
            web_url: constants::DEFAULT_WEB_URL.to_string(),
        }
    }
}

/// Dispatcher limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    /// Concurrent writes per run
    pub concurrency: usize,
    /// Per-name write deadline
    pub timeout_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            concurrency: constants::DEFAULT_CONCURRENCY,
            timeout_secs: constants::DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Additions to the built-in protection table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicyConfig {
    pub unknown: UnknownNames,
    pub provisioning_only: Vec<String>,
    pub syncable: Vec<String>,
}

impl Config {
    /// Load configuration.
    ///
    /// Lookup order: `explicit` path, `./.secret-sync.toml`, then the user
    /// config directory. Environment overrides are applied afterwards.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` if an explicit path cannot be read,
    /// `ConfigError::Parse` for malformed TOML, or `ConfigError::InvalidValue`
    /// when validation fails.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match Self::locate(explicit) {
            Some(path) => Self::read(&path)?,
            None => {
                debug!("no config file found, using defaults");
                Self::default()
            }
        };

        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }

        let local = PathBuf::from(constants::CONFIG_FILE);
        if local.exists() {
            return Some(local);
        }

        dirs::config_dir()
            .map(|dir| {
                dir.join(constants::CONFIG_DIR)
                    .join(constants::GLOBAL_CONFIG_FILE)
            })
            .filter(|p| p.exists())
    }

    fn read(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents)
    }

    /// Parse TOML contents without validating.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed TOML or unknown keys.
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents).map_err(ConfigError::Parse)?)
    }

    /// Apply environment overrides through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(repo) = non_empty(env::SOURCE_REPO) {
            self.source.repo = Some(repo);
        }
        if let Some(url) = non_empty(env::API_URL) {
            self.platform.api_url = url;
        }
        if let Some(url) = non_empty(env::SERVER_URL) {
            self.platform.web_url = url;
        }
    }

    /// Validate values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if let Some(repo) = &self.source.repo {
            validation::parse_repository(repo).map_err(|e| ConfigError::InvalidValue {
                field: "source.repo",
                reason: e.to_string(),
            })?;
        }

        if self.source.workflow.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "source.workflow",
                reason: "cannot be empty".to_string(),
            }
            .into());
        }

        for (field, url) in [
            ("platform.api_url", &self.platform.api_url),
            ("platform.web_url", &self.platform.web_url),
        ] {
            if !url.starts_with("https://") && !url.starts_with("http://") {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("not an http(s) URL: {}", url),
                }
                .into());
            }
        }

        if self.sync.concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "sync.concurrency",
                reason: "must be at least 1".to_string(),
            }
            .into());
        }

        if self.sync.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "sync.timeout_secs",
                reason: "must be at least 1".to_string(),
            }
            .into());
        }

        self.policy()?;
        Ok(())
    }

    /// The configured source repository.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoSourceRepo` when unset.
    pub fn source_repo(&self) -> Result<RepositoryRef> {
        let repo = self.source.repo.as_deref().ok_or(ConfigError::NoSourceRepo)?;
        Ok(validation::parse_repository(repo)?)
    }

    /// Effective protection policy: built-ins plus this file's additions.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a listed name is invalid.
    pub fn policy(&self) -> Result<Policy> {
        let provisioning_only =
            parse_policy_names("policy.provisioning_only", &self.policy.provisioning_only)?;
        let syncable = parse_policy_names("policy.syncable", &self.policy.syncable)?;
        Ok(Policy::with_additions(
            &provisioning_only,
            &syncable,
            self.policy.unknown,
        ))
    }

    /// Write concurrency, clamped to `1..=MAX_CONCURRENCY`.
    pub fn concurrency(&self) -> usize {
        self.sync.concurrency.clamp(1, constants::MAX_CONCURRENCY)
    }

    /// Per-name write deadline.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.sync.timeout_secs)
    }

    /// Platform API base without a trailing slash.
    pub fn api_url(&self) -> &str {
        self.platform.api_url.trim_end_matches('/')
    }

    /// Platform web base without a trailing slash.
    pub fn web_url(&self) -> &str {
        self.platform.web_url.trim_end_matches('/')
    }
}

fn parse_policy_names(field: &'static str, names: &[String]) -> Result<Vec<SecretName>> {
    names
        .iter()
        .map(|n| {
            SecretName::new(n.as_str()).map_err(|e| {
                Error::from(ConfigError::InvalidValue {
                    field,
                    reason: e.to_string(),
                })
            })
        })
        .collect()
}
