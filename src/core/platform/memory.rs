//! In-process secret store.
//!
//! Holds secrets per repository in memory. Used by tests and scripted
//! runs; failures and slow writes can be injected per name.

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use super::SecretStore;
use crate::core::types::{RepositoryRef, SecretName, SecretValue};
use crate::error::PlatformError;

#[derive(Default)]
struct Inner {
    repos: BTreeMap<String, BTreeMap<SecretName, SecretValue>>,
    failures: BTreeMap<SecretName, PlatformError>,
    delays: BTreeMap<SecretName, Duration>,
    writes: usize,
}

/// In-memory store. Clones share state.
#[derive(Clone, Default)]
pub struct Memory {
    inner: Arc<Mutex<Inner>>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register an empty repository.
    pub fn add_repo(&self, repo: &RepositoryRef) {
        self.lock().repos.entry(repo.to_string()).or_default();
    }

    /// Store a value directly, registering the repository if needed.
    pub fn insert(&self, repo: &RepositoryRef, name: SecretName, value: SecretValue) {
        self.lock()
            .repos
            .entry(repo.to_string())
            .or_default()
            .insert(name, value);
    }

    /// Current value of `name` in `repo`.
    pub fn get(&self, repo: &RepositoryRef, name: &SecretName) -> Option<SecretValue> {
        self.lock()
            .repos
            .get(&repo.to_string())
            .and_then(|secrets| secrets.get(name).cloned())
    }

    /// Make every write of `name` fail with `error`.
    pub fn fail_writes(&self, name: SecretName, error: PlatformError) {
        self.lock().failures.insert(name, error);
    }

    /// Make every write of `name` take `delay` before completing.
    pub fn delay_writes(&self, name: SecretName, delay: Duration) {
        self.lock().delays.insert(name, delay);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }
}

#[async_trait]
impl SecretStore for Memory {
    async fn list(&self, repo: &RepositoryRef) -> Result<BTreeSet<SecretName>, PlatformError> {
        self.lock()
            .repos
            .get(&repo.to_string())
            .map(|secrets| secrets.keys().cloned().collect())
            .ok_or(PlatformError::RepositoryNotFound)
    }

    async fn write(
        &self,
        repo: &RepositoryRef,
        name: &SecretName,
        value: &SecretValue,
    ) -> Result<(), PlatformError> {
        let delay = self.lock().delays.get(name).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut inner = self.lock();
        if let Some(error) = inner.failures.get(name) {
            return Err(error.clone());
        }

        let secrets = inner
            .repos
            .get_mut(&repo.to_string())
            .ok_or(PlatformError::RepositoryNotFound)?;
        secrets.insert(name.clone(), value.clone());
        inner.writes += 1;
        Ok(())
    }
}
