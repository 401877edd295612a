//! Tag-set reconciliation.
//!
//! Converges the registry's prefixed-tag subset to exactly
//! `{prefix + topic : topic in favorites}` with minimal add/remove
//! operations. Tags without the prefix belong to someone else and are never
//! inspected or touched.

use autotag_types::Topic;

/// Minimal operations converging the registry to the favorite set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagDelta {
    /// Tags to add (already prefixed).
    pub to_add: Vec<String>,
    /// Tags to remove (already prefixed).
    pub to_remove: Vec<String>,
}

impl TagDelta {
    /// Whether the registry is already converged.
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Compute the delta between current tags and favorite topics.
///
/// - `to_remove`: prefixed tags whose suffix is not a favorite
/// - `to_add`: favorites whose prefixed tag is not yet present
///
/// Both sets are duplicate-free given unique inputs; unprefixed tags pass
/// through untouched.
pub fn diff(current_tags: &[String], favorites: &[Topic], prefix: &str) -> TagDelta {
    let to_remove = current_tags
        .iter()
        .filter(|tag| {
            tag.strip_prefix(prefix)
                .is_some_and(|suffix| !favorites.iter().any(|f| f == suffix))
        })
        .cloned()
        .collect();

    let to_add = favorites
        .iter()
        .map(|topic| format!("{prefix}{topic}"))
        .filter(|tag| !current_tags.contains(tag))
        .collect();

    TagDelta { to_add, to_remove }
}
