//! Test support utilities for secret-sync integration tests.
//!
//! Provides isolated environments, command shortcuts and a mock GitHub API.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;
#[allow(unused_imports)]
pub use github::MockGitHub;

use std::path::PathBuf;
use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// Child processes get `.current_dir()` and a scrubbed environment, so
/// tests can run in parallel and never see the host's CI variables.
pub struct Test {
    /// Working directory for the command
    pub dir: TempDir,
    /// Temporary home directory
    pub home: TempDir,
    /// Extra environment for every command
    pub env: Vec<(String, String)>,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");

        Self {
            dir,
            home,
            env: Vec::new(),
        }
    }

    /// Add an environment variable to every command.
    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.env.push((key.to_string(), value.to_string()));
        self
    }

    /// Point every platform call at `server`, authenticated, as `repo`.
    pub fn against(self, server: &MockGitHub, repo: &str) -> Self {
        self.with_env("GITHUB_API_URL", &server.uri())
            .with_env("GH_TOKEN", TEST_TOKEN)
            .with_env("GITHUB_REPOSITORY", repo)
    }

    /// Write `.secret-sync.toml` in the working directory.
    pub fn write_config(&self, contents: &str) -> PathBuf {
        let path = self.dir.path().join(".secret-sync.toml");
        std::fs::write(&path, contents).expect("failed to write config");
        path
    }

    /// Write a source catalog JSON file and return its path.
    pub fn write_catalog(&self, json: &str) -> PathBuf {
        let path = self.dir.path().join("catalog.json");
        std::fs::write(&path, json).expect("failed to write catalog");
        path
    }
}
