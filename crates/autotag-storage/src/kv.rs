//! Key-value store collaborator trait.
//!
//! The host owns durability; the engine only needs asynchronous get/set by
//! key. A missing key reads as `None`, never as an error.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::StorageError;

/// Asynchronous key-value storage provided by the embedding host.
///
/// Implementations are expected to be last-writer-wins; the engine
/// serializes its own read-modify-write cycles and does not rely on any
/// optimistic-concurrency support here.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Replace the value stored under `key`.
    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError>;
}

/// In-process store backed by a `HashMap`.
///
/// Reference implementation for tests and for hosts without persistent
/// storage; contents are lost when the process exits.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }
}
