//! Key-value persistence collaborator.

use crate::error::StoreError;
use std::sync::Arc;

/// Flat string store keyed by namespace
pub trait KeyValueStore: Send + Sync {
    /// Serialized value stored under `namespace`, if any
    fn get(&self, namespace: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `namespace`
    fn set(&self, namespace: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, namespace: &str) -> Result<Option<String>, StoreError> {
        (**self).get(namespace)
    }

    fn set(&self, namespace: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(namespace, value)
    }
}
