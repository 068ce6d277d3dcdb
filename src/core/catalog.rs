//! Source secret catalog.
//!
//! The dispatcher's view of the source repository's secrets. The platform
//! only exposes values inside the source repository's own pipeline, where
//! the workflow serialises them into a single environment variable as a
//! JSON object. That object is parsed once and looked up by name.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use crate::core::constants::env;
use crate::core::types::{SecretName, SecretValue};
use crate::error::{CatalogError, Result};

/// Read access to the source repository's secret values.
pub trait SecretCatalog: Send + Sync {
    /// Current value for `name`, if the source holds one.
    fn resolve(&self, name: &SecretName) -> Option<SecretValue>;
}

/// Catalog backed by a JSON object of `NAME: "value"` pairs.
#[derive(Default)]
pub struct JsonCatalog {
    values: BTreeMap<SecretName, SecretValue>,
}

impl JsonCatalog {
    /// Parse a JSON object.
    ///
    /// Keys that are not valid secret names and non-string values are
    /// skipped; the platform adds entries of its own (e.g. `github_token`).
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` if `json` is not an object.
    pub fn parse(json: &str) -> Result<Self> {
        let object: Map<String, Value> =
            serde_json::from_str(json).map_err(CatalogError::Parse)?;

        let mut values = BTreeMap::new();
        for (key, value) in object {
            let Ok(name) = SecretName::new(key.as_str()) else {
                debug!(key = %key, "skipping catalog entry with invalid name");
                continue;
            };
            match value {
                Value::String(s) => {
                    values.insert(name, SecretValue::new(s.into_bytes()));
                }
                _ => debug!(name = %name, "skipping non-string catalog entry"),
            }
        }

        debug!(entries = values.len(), "catalog loaded");
        Ok(Self { values })
    }

    /// Load from `SECRET_SYNC_SOURCE_JSON`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Missing` when the variable is unset or blank.
    pub fn from_env() -> Result<Self> {
        match std::env::var(env::SOURCE_JSON) {
            Ok(json) if !json.trim().is_empty() => Self::parse(&json),
            _ => Err(CatalogError::Missing.into()),
        }
    }

    /// Load from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ReadFile` or `CatalogError::Parse`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&json)
    }

    /// Load from `path` when given, otherwise from the environment.
    ///
    /// # Errors
    ///
    /// See [`JsonCatalog::from_file`] and [`JsonCatalog::from_env`].
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::from_env(),
        }
    }

    /// Insert a value directly.
    pub fn insert(&mut self, name: SecretName, value: SecretValue) {
        self.values.insert(name, value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SecretCatalog for JsonCatalog {
    fn resolve(&self, name: &SecretName) -> Option<SecretValue> {
        self.values.get(name).cloned()
    }
}
