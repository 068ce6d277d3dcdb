//! Constants used throughout secret-sync.
//!
//! Centralizes file names, environment variables and default limits.

/// Project-local configuration file name.
pub const CONFIG_FILE: &str = ".secret-sync.toml";

/// Directory under the user config dir holding the global config.
pub const CONFIG_DIR: &str = "secret-sync";

/// Global configuration file name inside [`CONFIG_DIR`].
pub const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Default dispatcher workflow file in the source repository.
pub const DEFAULT_WORKFLOW: &str = "sync-secrets.yml";

/// Default platform REST endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default platform web endpoint, used for remediation links.
pub const DEFAULT_WEB_URL: &str = "https://github.com";

/// Default number of concurrent secret writes.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Upper bound for concurrent secret writes.
pub const MAX_CONCURRENCY: usize = 16;

/// Default per-name write deadline in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Page size for secret listing requests.
pub const LIST_PAGE_SIZE: usize = 100;

/// Environment variables read by secret-sync.
pub mod env {
    /// Path to an explicit config file.
    pub const CONFIG: &str = "SECRET_SYNC_CONFIG";
    /// Log filter directive.
    pub const LOG: &str = "SECRET_SYNC_LOG";
    /// Log format (`json` for structured output).
    pub const LOG_FORMAT: &str = "SECRET_SYNC_LOG_FORMAT";
    /// JSON object of the source repository's secrets.
    pub const SOURCE_JSON: &str = "SECRET_SYNC_SOURCE_JSON";
    /// Overrides `source.repo`.
    pub const SOURCE_REPO: &str = "SECRET_SYNC_SOURCE_REPO";
    /// Platform tokens, in lookup order.
    pub const TOKENS: &[&str] = &["GH_TOKEN", "GITHUB_TOKEN"];
    /// Platform API URL as exported by the platform's runners.
    pub const API_URL: &str = "GITHUB_API_URL";
    /// Platform web URL as exported by the platform's runners.
    pub const SERVER_URL: &str = "GITHUB_SERVER_URL";
    /// Repository running the current pipeline.
    pub const REPOSITORY: &str = "GITHUB_REPOSITORY";
    /// Generic CI marker.
    pub const CI: &str = "CI";
    /// Platform-specific CI marker.
    pub const ACTIONS: &str = "GITHUB_ACTIONS";
}

/// Reason strings used in sync outcomes.
pub mod reasons {
    /// Recorded for names the policy never lets leave the source.
    pub const PROVISIONING_ONLY: &str = "provisioning-only secret, never synced";
    /// Recorded for names the source catalog does not hold yet.
    pub const SOURCE_MISSING: &str = "source has no such secret yet";
}
