//! Time-decayed topic scoring.
//!
//! Each view contributes `exp(-ln2 * age / half_life)` to its topic's
//! score: a view taken right now contributes close to 1, a view exactly one
//! half-life old contributes 0.5, and older views tend to zero without ever
//! reaching it. Scores are recomputed in full on every pass; the persisted
//! raw timestamps are the only carried state.

use autotag_types::{Timestamp, Topic, ViewsByTopic};

/// Ranks topics by decayed view score.
#[derive(Debug, Clone)]
pub struct DecayScorer {
    /// Decay half-life in milliseconds.
    half_life_ms: i64,
    /// Minimum view count for a topic to be rankable (floor already applied).
    min_views: usize,
    /// Maximum number of favorites returned.
    num_topics: usize,
}

impl DecayScorer {
    /// Create a scorer. `min_views` is used as given; callers apply the
    /// configured floor before constructing.
    pub fn new(half_life_ms: i64, min_views: usize, num_topics: usize) -> Self {
        Self {
            half_life_ms,
            min_views,
            num_topics,
        }
    }

    /// Decayed score of one topic's view history at `now`.
    pub fn score(&self, timestamps: &[Timestamp], now: Timestamp) -> f64 {
        timestamps
            .iter()
            .map(|t| {
                let age = (now - t) as f64;
                (-std::f64::consts::LN_2 * age / self.half_life_ms as f64).exp()
            })
            .sum()
    }

    /// Rank the favorite topics at `now`.
    ///
    /// Topics with fewer than `min_views` views are excluded entirely, not
    /// zero-scored. The sort is stable and the input map iterates in key
    /// order, so equal scores tie-break lexicographically by topic; repeated
    /// calls with identical input yield identical output.
    pub fn rank(&self, views: &ViewsByTopic, now: Timestamp) -> Vec<Topic> {
        let mut rated: Vec<(&Topic, f64)> = views
            .iter()
            .filter(|(_, timestamps)| timestamps.len() >= self.min_views)
            .map(|(topic, timestamps)| (topic, self.score(timestamps, now)))
            .collect();

        rated.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        rated
            .into_iter()
            .take(self.num_topics)
            .map(|(topic, _)| topic.clone())
            .collect()
    }
}
