//! # Rules Module
//!
//! User-defined extension → folder overrides for the `by-type` organize mode.
//!
//! Rules live in a [`RuleStore`] that is handed to whoever needs them,
//! rather than in ambient global state. The store is loaded once from a
//! [`KeyValueStore`] and writes the whole rule map back after every
//! add/remove.
//!
//! ## Backends
//! - `SqliteStore` - Persistent storage using SQLite
//! - `InMemoryStore` - For testing

mod memory;
mod sqlite;
mod traits;

pub use memory::InMemoryStore;
pub use sqlite::SqliteStore;
pub use traits::KeyValueStore;

use crate::error::{RuleError, StoreError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Key the rule map is stored under
pub const RULES_NAMESPACE: &str = "ziplifica-custom-rules";

/// Flat map from lowercase extension (no dot) to uppercase folder name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomRules(BTreeMap<String, String>);

impl CustomRules {
    /// Folder for an already-lowercased extension
    pub fn folder_for(&self, extension: &str) -> Option<&str> {
        if extension.is_empty() {
            return None;
        }
        self.0.get(extension).map(String::as_str)
    }

    /// Insert a rule as-is. `RuleStore::add` is the normalizing entry point.
    pub fn insert(&mut self, extension: impl Into<String>, folder: impl Into<String>) {
        self.0.insert(extension.into(), folder.into());
    }

    pub fn remove(&mut self, extension: &str) -> Option<String> {
        self.0.remove(extension)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(ext, folder)| (ext.as_str(), folder.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Custom rules bound to the store that persists them
pub struct RuleStore {
    rules: CustomRules,
    store: Box<dyn KeyValueStore>,
}

impl RuleStore {
    /// Load rules from `store`.
    ///
    /// A stored value that isn't a valid rule map is logged and treated as
    /// an empty rule set; it gets overwritten on the next mutation.
    pub fn load(store: Box<dyn KeyValueStore>) -> Result<Self, StoreError> {
        let rules = match store.get(RULES_NAMESPACE)? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "ignoring unreadable custom rules");
                CustomRules::default()
            }),
            None => CustomRules::default(),
        };
        debug!(count = rules.len(), "loaded custom rules");
        Ok(Self { rules, store })
    }

    /// Rule store over an in-memory backend with no rules
    pub fn in_memory() -> Self {
        Self {
            rules: CustomRules::default(),
            store: Box::new(InMemoryStore::new()),
        }
    }

    pub fn rules(&self) -> &CustomRules {
        &self.rules
    }

    /// Add or replace a rule and persist immediately.
    ///
    /// The extension is trimmed, lowercased and stripped of one leading
    /// dot; the folder is trimmed and uppercased. Returns the stored pair.
    pub fn add(&mut self, extension: &str, folder: &str) -> Result<(String, String), RuleError> {
        let extension = extension.trim().to_lowercase();
        let extension = extension
            .strip_prefix('.')
            .unwrap_or(extension.as_str())
            .to_string();
        let folder = folder.trim().to_uppercase();

        if extension.is_empty() {
            return Err(RuleError::EmptyExtension);
        }
        if folder.is_empty() {
            return Err(RuleError::EmptyFolder);
        }

        let mut next = self.rules.clone();
        next.insert(extension.clone(), folder.clone());
        self.persist(next)?;
        debug!(%extension, %folder, "custom rule saved");
        Ok((extension, folder))
    }

    /// Remove the rule for `extension`, persisting if something was removed
    pub fn remove(&mut self, extension: &str) -> Result<bool, RuleError> {
        let extension = extension.trim().to_lowercase();
        let extension = extension.strip_prefix('.').unwrap_or(extension.as_str());

        let mut next = self.rules.clone();
        if next.remove(extension).is_none() {
            return Ok(false);
        }
        self.persist(next)?;
        Ok(true)
    }

    /// Save `next` and only then make it the live rule set
    fn persist(&mut self, next: CustomRules) -> Result<(), StoreError> {
        let raw =
            serde_json::to_string(&next).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.store.set(RULES_NAMESPACE, &raw)?;
        self.rules = next;
        Ok(())
    }
}
