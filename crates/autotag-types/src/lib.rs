//! # autotag-types
//!
//! Shared data types for the autotag engine.
//!
//! A visitor's interests are inferred from page views: each qualifying view
//! appends a timestamp to a per-topic history, and a time-decayed score over
//! that history ranks the visitor's favorite topics. This crate holds the
//! vocabulary shared across the workspace:
//! - Topic normalization (a topic *is* its normalized string)
//! - The persisted `ViewsByTopic` aggregate
//! - Page-view trigger payloads
//! - Engine configuration

pub mod config;
pub mod normalize;
pub mod types;

pub use config::AutotagConfig;
pub use normalize::normalize;
pub use types::{PageLocator, PageSnapshot, Timestamp, Topic, ViewsByTopic};
