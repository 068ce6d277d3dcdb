//! Policy inspection commands.

use serde::Serialize;

use crate::cli::output;
use crate::core::config::Config;
use crate::core::policy::{Policy, ProtectionClass, Source, UnknownNames};
use crate::core::validation;
use crate::error::{Error, Result};

/// Print the protection class of each name.
pub fn classify(config: &Config, names: &[String]) -> Result<()> {
    let names = validation::parse_name_args(names)?;
    let policy = config.policy()?;
    let width = names.iter().map(|n| n.as_str().len()).max().unwrap_or(0);

    for name in &names {
        let (class, source) = policy.classify_with_source(name);
        let origin = match source {
            Source::Listed => "listed",
            Source::Default => "unlisted, default",
        };
        let class = match class {
            ProtectionClass::Syncable => output::cmd("syncable"),
            ProtectionClass::ProvisioningOnly => class.to_string(),
        };
        println!(
            "{}  {}  ({})",
            output::key(&format!("{:<width$}", name.as_str())),
            class,
            origin
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct PolicyTable<'a> {
    unknown: UnknownNames,
    provisioning_only: Vec<&'a str>,
    syncable: Vec<&'a str>,
}

impl<'a> From<&'a Policy> for PolicyTable<'a> {
    fn from(policy: &'a Policy) -> Self {
        Self {
            unknown: policy.unknown(),
            provisioning_only: policy.provisioning_only().collect(),
            syncable: policy.syncable().collect(),
        }
    }
}

/// Print the effective policy table.
pub fn show(config: &Config, json: bool) -> Result<()> {
    let policy = config.policy()?;
    let table = PolicyTable::from(&policy);

    if json {
        let json = serde_json::to_string_pretty(&table)
            .map_err(|e| Error::Other(format!("failed to serialize policy: {}", e)))?;
        println!("{}", json);
        return Ok(());
    }

    output::section("Provisioning-only (never synced)");
    for name in &table.provisioning_only {
        output::list_item(name);
    }

    output::section("Syncable");
    for name in &table.syncable {
        output::list_item(name);
    }

    println!();
    let unknown = match table.unknown {
        UnknownNames::Deny => "deny (treated as provisioning-only)",
        UnknownNames::Allow => "allow (treated as syncable)",
    };
    output::kv("unknown names", unknown);
    Ok(())
}
