//! Persisted per-topic view history.
//!
//! The whole history lives under one key as a single JSON object mapping
//! topic to an array of view timestamps. Every update is a read-modify-write
//! of that object, serialized through an in-process lock so overlapping
//! page-view cycles cannot lose each other's appends.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use autotag_types::{Timestamp, Topic, ViewsByTopic};

use crate::error::StorageError;
use crate::kv::KeyValueStore;

/// Storage key for the view history aggregate.
pub const VIEWS_KEY: &str = "viewsByTopic";

/// Retention policy for a topic's view history.
///
/// `None` in either field means that dimension is unbounded; with both
/// absent, histories grow without limit, which is a deliberate mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct RetentionPolicy {
    /// Keep at most this many views per topic.
    pub max_views: Option<usize>,
    /// Drop views older than this many milliseconds.
    pub max_view_age_ms: Option<i64>,
}

impl RetentionPolicy {
    /// Apply the policy to one topic's timestamps.
    ///
    /// Age filtering runs first (drop anything strictly older than
    /// `now - max_view_age_ms`), then the count cap: sort ascending and cut
    /// the oldest entries down to `max_views`.
    pub fn apply(&self, timestamps: &mut Vec<Timestamp>, now: Timestamp) {
        if let Some(max_age) = self.max_view_age_ms {
            let cutoff = now - max_age;
            timestamps.retain(|t| *t >= cutoff);
        }
        if let Some(max_views) = self.max_views {
            if timestamps.len() > max_views {
                timestamps.sort_unstable();
                let excess = timestamps.len() - max_views;
                timestamps.drain(..excess);
            }
        }
    }
}

/// Sole writer of the persisted `viewsByTopic` aggregate.
pub struct ViewStore {
    store: Arc<dyn KeyValueStore>,
    retention: RetentionPolicy,
    /// Serializes read-modify-write so concurrent cycles cannot interleave.
    write_lock: Mutex<()>,
}

impl ViewStore {
    /// Create a view store over the host's key-value storage.
    pub fn new(store: Arc<dyn KeyValueStore>, retention: RetentionPolicy) -> Self {
        Self {
            store,
            retention,
            write_lock: Mutex::new(()),
        }
    }

    /// Record one view of each given topic at `now`, then persist.
    ///
    /// Appends `now` to each topic's history (creating it if absent),
    /// applies retention, and writes the full map back in one `set`. A
    /// storage failure before the write leaves the persisted state
    /// untouched.
    #[instrument(skip(self, topics), fields(topic_count = topics.len()))]
    pub async fn record(&self, topics: &[Topic], now: Timestamp) -> Result<(), StorageError> {
        if topics.is_empty() {
            return Ok(());
        }
        let _guard = self.write_lock.lock().await;

        let mut views = self.load().await?;
        for topic in topics {
            let timestamps = views.entry(topic.clone()).or_default();
            timestamps.push(now);
            self.retention.apply(timestamps, now);
        }

        let value = serde_json::to_value(&views)?;
        self.store.set(VIEWS_KEY, value).await?;
        debug!(topics = ?topics, "Recorded views");
        Ok(())
    }

    /// Load the full view history.
    ///
    /// Decodes leniently: a topic whose stored value is not a non-empty
    /// array of integer timestamps is treated as absent rather than
    /// failing the caller.
    pub async fn load(&self) -> Result<ViewsByTopic, StorageError> {
        let raw = self.store.get(VIEWS_KEY).await?;
        Ok(raw.map(decode_views).unwrap_or_default())
    }
}

/// Decode the stored JSON value, dropping anomalous entries.
fn decode_views(raw: Value) -> ViewsByTopic {
    let mut views = ViewsByTopic::new();
    let Value::Object(map) = raw else {
        return views;
    };
    for (topic, value) in map {
        let Value::Array(items) = value else { continue };
        let timestamps: Vec<Timestamp> = items.iter().filter_map(Value::as_i64).collect();
        if !timestamps.is_empty() {
            views.insert(topic, timestamps);
        }
    }
    views
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;
    use serde_json::json;

    fn view_store(retention: RetentionPolicy) -> (Arc<MemoryStore>, ViewStore) {
        let store = Arc::new(MemoryStore::new());
        let views = ViewStore::new(store.clone(), retention);
        (store, views)
    }

    #[tokio::test]
    async fn test_record_creates_history() {
        let (_, views) = view_store(RetentionPolicy::default());
        views.record(&["shoes".to_string()], 100).await.unwrap();
        let loaded = views.load().await.unwrap();
        assert_eq!(loaded["shoes"], vec![100]);
    }

    #[tokio::test]
    async fn test_record_appends() {
        let (_, views) = view_store(RetentionPolicy::default());
        for now in [1, 2, 3] {
            views.record(&["shoes".to_string()], now).await.unwrap();
        }
        let loaded = views.load().await.unwrap();
        assert_eq!(loaded["shoes"], vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_max_views_keeps_most_recent() {
        let (_, views) = view_store(RetentionPolicy {
            max_views: Some(3),
            max_view_age_ms: None,
        });
        for now in [1, 2, 3, 4, 5] {
            views.record(&["shoes".to_string()], now).await.unwrap();
        }
        let loaded = views.load().await.unwrap();
        assert_eq!(loaded["shoes"], vec![3, 4, 5]);
    }

    #[tokio::test]
    async fn test_max_view_age_drops_old() {
        let (_, views) = view_store(RetentionPolicy {
            max_views: None,
            max_view_age_ms: Some(10),
        });
        views.record(&["shoes".to_string()], 100).await.unwrap();
        views.record(&["shoes".to_string()], 200).await.unwrap();
        let loaded = views.load().await.unwrap();
        // The view at 100 is older than 200 - 10.
        assert_eq!(loaded["shoes"], vec![200]);
    }

    #[tokio::test]
    async fn test_unbounded_mode_grows() {
        let (_, views) = view_store(RetentionPolicy::default());
        for now in 0..50 {
            views.record(&["shoes".to_string()], now).await.unwrap();
        }
        let loaded = views.load().await.unwrap();
        assert_eq!(loaded["shoes"].len(), 50);
    }

    #[tokio::test]
    async fn test_multiple_topics_one_write() {
        let (_, views) = view_store(RetentionPolicy::default());
        views
            .record(&["shoes".to_string(), "hats".to_string()], 7)
            .await
            .unwrap();
        let loaded = views.load().await.unwrap();
        assert_eq!(loaded["shoes"], vec![7]);
        assert_eq!(loaded["hats"], vec![7]);
    }

    #[tokio::test]
    async fn test_record_nothing_is_noop() {
        let (store, views) = view_store(RetentionPolicy::default());
        views.record(&[], 7).await.unwrap();
        assert!(store.get(VIEWS_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_anomalous_entries_treated_as_absent() {
        let (store, views) = view_store(RetentionPolicy::default());
        store
            .set(
                VIEWS_KEY,
                json!({
                    "good": [1, 2],
                    "strings": ["a", "b"],
                    "empty": [],
                    "not_an_array": "oops",
                }),
            )
            .await
            .unwrap();
        let loaded = views.load().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded["good"], vec![1, 2]);
    }

    #[test]
    fn test_retention_age_before_count() {
        let policy = RetentionPolicy {
            max_views: Some(2),
            max_view_age_ms: Some(100),
        };
        let mut timestamps = vec![1, 2, 950, 960, 1000];
        policy.apply(&mut timestamps, 1000);
        assert_eq!(timestamps, vec![960, 1000]);
    }
}
