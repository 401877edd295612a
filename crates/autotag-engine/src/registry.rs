//! Tag registry collaborator trait.
//!
//! The registry is an external label set with list and batched add/remove
//! operations; the engine never owns it and only touches tags carrying its
//! configured prefix.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::AutotagError;

/// Asynchronous tag registry provided by the embedding host.
#[async_trait]
pub trait TagRegistry: Send + Sync {
    /// List all current tags.
    async fn get_tags(&self) -> Result<Vec<String>, AutotagError>;

    /// Apply additions and removals in one batched call.
    async fn add_remove_tags(
        &self,
        to_add: &[String],
        to_remove: &[String],
    ) -> Result<(), AutotagError>;
}

/// In-process registry for tests and hosts without an external one.
#[derive(Default)]
pub struct MemoryTagRegistry {
    tags: RwLock<Vec<String>>,
}

impl MemoryTagRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry pre-populated with tags.
    pub fn with_tags(tags: Vec<String>) -> Self {
        Self {
            tags: RwLock::new(tags),
        }
    }
}

#[async_trait]
impl TagRegistry for MemoryTagRegistry {
    async fn get_tags(&self) -> Result<Vec<String>, AutotagError> {
        Ok(self.tags.read().await.clone())
    }

    async fn add_remove_tags(
        &self,
        to_add: &[String],
        to_remove: &[String],
    ) -> Result<(), AutotagError> {
        let mut tags = self.tags.write().await;
        tags.retain(|tag| !to_remove.contains(tag));
        for tag in to_add {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }
        Ok(())
    }
}
