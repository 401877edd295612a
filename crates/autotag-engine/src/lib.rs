//! # autotag-engine
//!
//! Interest inference and tag reconciliation.
//!
//! On every page-view trigger the engine extracts candidate topics from the
//! page locator (or content snapshot), records a timestamped view per topic,
//! ranks topics by a time-decayed score, and converges an externally held
//! tag set to exactly the current favorites.
//!
//! The engine owns no ambient state: the host supplies the key-value store
//! and the tag registry as trait objects, and fires
//! [`Autotag::handle_page_view`] once per distinct navigation.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use autotag_engine::{Autotag, MemoryTagRegistry};
//! use autotag_storage::MemoryStore;
//! use autotag_types::{AutotagConfig, PageLocator};
//!
//! let engine = Autotag::new(
//!     AutotagConfig::default(),
//!     Arc::new(MemoryStore::new()),
//!     Arc::new(MemoryTagRegistry::new()),
//! )?;
//! let locator = PageLocator::new("https://x.example/a/b/c", "x.example", "/a/b/c");
//! let outcome = engine.handle_page_view(&locator, None).await;
//! ```

pub mod error;
pub mod extractor;
pub mod filter;
pub mod orchestrator;
pub mod reconcile;
pub mod registry;
pub mod scoring;

pub use error::AutotagError;
pub use extractor::TopicExtractor;
pub use filter::UrlFilter;
pub use orchestrator::{Autotag, CycleOutcome};
pub use reconcile::{diff, TagDelta};
pub use registry::{MemoryTagRegistry, TagRegistry};
pub use scoring::DecayScorer;
