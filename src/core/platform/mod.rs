//! Hosting platform secret stores.
//!
//! The platform owns every repository's secret store; this crate only
//! lists names and writes values through it. Values are never read back.
//!
//! ## Adding a New Platform
//!
//! 1. Implement the `SecretStore` trait
//! 2. Add the implementation in a new file (e.g., `gitlab.rs`)
//! 3. Re-export from this module

use async_trait::async_trait;
use std::collections::BTreeSet;

use crate::core::types::{RepositoryRef, SecretName, SecretValue};
use crate::error::PlatformError;

mod github;
mod memory;

pub use github::GitHub;
pub use memory::Memory;

/// A repository secret store reachable through the platform API.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Names of the secrets stored for `repo`.
    ///
    /// This is a presence query only: values are never returned.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError` if the listing fails.
    async fn list(&self, repo: &RepositoryRef) -> Result<BTreeSet<SecretName>, PlatformError>;

    /// Create or replace `name` in `repo` with `value`, byte for byte.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError` if the write is rejected or fails.
    async fn write(
        &self,
        repo: &RepositoryRef,
        name: &SecretName,
        value: &SecretValue,
    ) -> Result<(), PlatformError>;
}
