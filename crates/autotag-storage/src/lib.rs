//! Storage layer for the autotag engine.
//!
//! The engine treats persistence as an external collaborator with plain
//! get/set-by-key semantics. This crate provides:
//! - The [`KeyValueStore`] trait the host implements
//! - [`MemoryStore`], an in-process reference implementation
//! - [`ViewStore`], the sole writer of the persisted `viewsByTopic`
//!   aggregate, with bounded retention

pub mod error;
pub mod kv;
pub mod views;

pub use error::StorageError;
pub use kv::{KeyValueStore, MemoryStore};
pub use views::{RetentionPolicy, ViewStore, VIEWS_KEY};
