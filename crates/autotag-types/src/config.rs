//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Minimum view-count floor enforced regardless of configuration.
///
/// A topic with a single view is never rankable; the floor prevents one
/// accidental click from producing a favorite.
pub const MIN_VIEWS_FLOOR: usize = 2;

/// Configuration for the autotag engine.
///
/// All fields have defaults, so an empty JSON object deserializes to a
/// working configuration (URL-position extraction, one favorite topic,
/// unbounded view history).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutotagConfig {
    /// Known topics to search for in page content. When non-empty, the
    /// URL-position strategy is ignored entirely.
    #[serde(default)]
    pub topic_list: Vec<String>,

    /// Allow patterns: when non-empty, the page href must match at least
    /// one for the view to be counted. Full regex syntax.
    #[serde(default)]
    pub whitelist: Vec<String>,

    /// Deny patterns: a matching href is never counted, regardless of the
    /// allow list. Full regex syntax.
    #[serde(default)]
    pub blacklist: Vec<String>,

    /// Index of the path segment used as the topic candidate; 0 means the
    /// hostname.
    #[serde(default = "default_url_position")]
    pub url_position: usize,

    /// Maximum number of favorite topics.
    #[serde(default = "default_num_topics")]
    pub num_topics: usize,

    /// Minimum number of views before a topic is rankable. A floor of
    /// [`MIN_VIEWS_FLOOR`] applies even when configured lower.
    #[serde(default = "default_min_views")]
    pub min_views: usize,

    /// Maximum number of views kept per topic. Absent means unbounded,
    /// which is deliberate, not an omission.
    #[serde(default)]
    pub max_views: Option<usize>,

    /// Age in milliseconds after which a view is dropped from history.
    /// Absent means views are kept forever.
    #[serde(default)]
    pub max_view_age_ms: Option<i64>,

    /// Decay half-life in milliseconds: a view this old contributes 0.5
    /// to its topic's score. Defaults to 30 days.
    #[serde(default = "default_age_mid_weight_ms")]
    pub age_mid_weight_ms: i64,

    /// Prefix identifying the tags this engine owns. Tags without the
    /// prefix are never touched.
    #[serde(default = "default_tag_prefix")]
    pub tag_prefix: String,
}

impl Default for AutotagConfig {
    fn default() -> Self {
        Self {
            topic_list: Vec::new(),
            whitelist: Vec::new(),
            blacklist: Vec::new(),
            url_position: default_url_position(),
            num_topics: default_num_topics(),
            min_views: default_min_views(),
            max_views: None,
            max_view_age_ms: None,
            age_mid_weight_ms: default_age_mid_weight_ms(),
            tag_prefix: default_tag_prefix(),
        }
    }
}

impl AutotagConfig {
    /// Effective minimum view count, with the floor applied.
    pub fn effective_min_views(&self) -> usize {
        self.min_views.max(MIN_VIEWS_FLOOR)
    }

    /// Configured topics, deduplicated preserving first occurrence.
    pub fn deduped_topic_list(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.topic_list
            .iter()
            .filter(|t| seen.insert(t.as_str()))
            .cloned()
            .collect()
    }
}

fn default_url_position() -> usize {
    1
}
fn default_num_topics() -> usize {
    1
}
fn default_min_views() -> usize {
    3
}
fn default_age_mid_weight_ms() -> i64 {
    2_592_000_000 // 30 days
}
fn default_tag_prefix() -> String {
    "topic:".to_string()
}
