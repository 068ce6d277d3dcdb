//! Sync dispatcher.
//!
//! The only component that moves secret values between repositories. It
//! runs with the source repository's identity: values come from the source
//! catalog and are written to the target, one independent key per name.
//!
//! Every name is handled in isolation. A skipped, missing or failed name
//! never stops the others, and the report keeps request order whatever
//! order the writes finish in.

use futures::stream::{self, StreamExt};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::core::catalog::SecretCatalog;
use crate::core::constants::{self, reasons};
use crate::core::domain::{OutcomeResult, SyncOutcome, SyncReport, SyncRequest};
use crate::core::platform::SecretStore;
use crate::core::policy::{Policy, ProtectionClass};
use crate::core::types::{RepositoryRef, SecretName};

/// Copies requested secrets from the source catalog to a target store.
pub struct Dispatcher<'a> {
    policy: &'a Policy,
    catalog: &'a dyn SecretCatalog,
    store: &'a dyn SecretStore,
    concurrency: usize,
    timeout: Duration,
    dry_run: bool,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        policy: &'a Policy,
        catalog: &'a dyn SecretCatalog,
        store: &'a dyn SecretStore,
    ) -> Self {
        Self {
            policy,
            catalog,
            store,
            concurrency: constants::DEFAULT_CONCURRENCY,
            timeout: Duration::from_secs(constants::DEFAULT_TIMEOUT_SECS),
            dry_run: false,
        }
    }

    /// Maximum writes in flight at once (at least 1).
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Deadline for each individual write.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Classify and resolve only; never write.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Process every requested name and report one outcome per name.
    pub async fn run(&self, request: &SyncRequest) -> SyncReport {
        info!(
            target = %request.target,
            names = request.names.len(),
            concurrency = self.concurrency,
            dry_run = self.dry_run,
            "dispatching sync request"
        );

        let outcomes: Vec<SyncOutcome> = stream::iter(&request.names)
            .map(|name| self.process(&request.target, name))
            .buffered(self.concurrency)
            .collect()
            .await;

        SyncReport::new(request.target.clone(), outcomes, self.dry_run)
    }

    async fn process(&self, target: &RepositoryRef, name: &SecretName) -> SyncOutcome {
        let result = self.process_result(target, name).await;
        match &result {
            OutcomeResult::Warned(reason) | OutcomeResult::Failed(reason) => {
                warn!(name = %name, target = %target, reason = %reason, "{}", result.label())
            }
            _ => info!(name = %name, target = %target, "{}", result.label()),
        }
        SyncOutcome::new(name.clone(), result)
    }

    async fn process_result(&self, target: &RepositoryRef, name: &SecretName) -> OutcomeResult {
        if self.policy.classify(name) == ProtectionClass::ProvisioningOnly {
            return OutcomeResult::Skipped(reasons::PROVISIONING_ONLY.to_string());
        }

        let Some(value) = self.catalog.resolve(name) else {
            return OutcomeResult::Warned(reasons::SOURCE_MISSING.to_string());
        };

        if self.dry_run {
            return OutcomeResult::WouldSync;
        }

        debug!(name = %name, target = %target, len = value.len(), "writing secret");
        match tokio::time::timeout(self.timeout, self.store.write(target, name, &value)).await {
            Ok(Ok(())) => OutcomeResult::Synced,
            Ok(Err(e)) => OutcomeResult::Failed(e.to_string()),
            Err(_) => OutcomeResult::Failed("timeout".to_string()),
        }
    }
}
