//! Core data types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A normalized topic identifier.
///
/// Two raw strings that normalize identically are the same topic; there is
/// no separate topic entity beyond the normalized string key.
pub type Topic = String;

/// Milliseconds since the Unix epoch.
pub type Timestamp = i64;

/// View-timestamp history per topic.
///
/// This is the single persisted aggregate, stored as one JSON value in the
/// external key-value store. `BTreeMap` keeps iteration order lexicographic,
/// which makes the persisted JSON stable and gives the scorer a deterministic
/// tie-break for equal scores.
pub type ViewsByTopic = BTreeMap<Topic, Vec<Timestamp>>;

/// Location of the page a view occurred on.
///
/// Produced by the external navigation observer; the engine never inspects
/// the page itself beyond what this and [`PageSnapshot`] carry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageLocator {
    /// Full URL, e.g. `https://shop.example.com/clothing/shoes/sneaker-42/`
    pub href: String,
    /// Hostname, e.g. `shop.example.com`
    pub hostname: String,
    /// Path, e.g. `/clothing/shoes/sneaker-42/`
    pub pathname: String,
}

impl PageLocator {
    /// Build a locator from its parts.
    pub fn new(
        href: impl Into<String>,
        hostname: impl Into<String>,
        pathname: impl Into<String>,
    ) -> Self {
        Self {
            href: href.into(),
            hostname: hostname.into(),
            pathname: pathname.into(),
        }
    }
}

/// Optional page-content snapshot for the topic-list extraction strategy.
///
/// DOM access belongs to the embedding host; it passes the already-extracted
/// text here. `meta_contents` carries the `content` attributes of the
/// `og:title`, `og:description`, `twitter:title` and `twitter:description`
/// meta tags, in that order, skipping absent tags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageSnapshot {
    /// Document title, if any.
    pub title: Option<String>,
    /// Raw text content of the first heading, if any.
    pub first_heading: Option<String>,
    /// Content attributes of the recognized meta tags.
    pub meta_contents: Vec<String>,
}

impl PageSnapshot {
    /// Snapshot with only a title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}
