//! Error types for secret-sync.
//!
//! Each concern has its own enum; they all nest under [`Error`] so callers
//! can propagate with `?` and the binary can pick a hint per variant.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Check(#[from] CheckError),

    #[error("{failed} of {total} secrets failed to sync")]
    SyncFailures { failed: usize, total: usize },

    #[error("{0}")]
    Other(String),
}

/// Configuration loading and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("source repository not configured")]
    NoSourceRepo,

    #[error("no platform token found (set GH_TOKEN or GITHUB_TOKEN)")]
    NoToken,

    #[error("cannot determine the current repository")]
    UnknownRepository,
}

/// Input validation errors. Raised before any platform call is made.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("secret name cannot be empty")]
    EmptyName,

    #[error("invalid secret name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("target repository cannot be empty")]
    EmptyTarget,

    #[error("invalid repository '{repo}': expected org/name")]
    InvalidRepository { repo: String },

    #[error("no secret names given")]
    EmptyNameList,
}

/// Failures talking to the hosting platform's secret store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    #[error("not authorized")]
    Unauthorized,

    #[error("target repository not found")]
    RepositoryNotFound,

    #[error("rate limited")]
    RateLimited,

    #[error("timeout")]
    Timeout,

    #[error("invalid repository public key: {0}")]
    InvalidPublicKey(String),

    #[error("encryption failed")]
    Encryption,

    #[error("api error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),
}

/// Source catalog errors.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("no source catalog available (set SECRET_SYNC_SOURCE_JSON or pass --catalog)")]
    Missing,

    #[error("failed to read catalog {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog is not a JSON object of string values: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Presence check failures.
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("required secrets missing: {}", .missing.join(", "))]
    MissingSecrets { missing: Vec<String> },
}

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;
