//! Page-view cycle orchestration.
//!
//! One trigger drives one cycle: filter → extract → record → rank →
//! reconcile. Cycles are serialized through a single async lock, so the
//! read-modify-write on the persisted view history never interleaves with
//! another cycle's. Collaborator failures discard the cycle with a log
//! line; nothing propagates out of the trigger path.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use autotag_storage::{KeyValueStore, RetentionPolicy, ViewStore};
use autotag_types::{AutotagConfig, PageLocator, PageSnapshot, Timestamp, Topic};

use crate::error::AutotagError;
use crate::extractor::TopicExtractor;
use crate::filter::UrlFilter;
use crate::reconcile::diff;
use crate::registry::TagRegistry;
use crate::scoring::DecayScorer;

/// Result of one page-view cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The cycle ran to completion and the registry is converged.
    ///
    /// `recorded` is the number of topics the view was counted for; it is 0
    /// when the href was filtered out or no candidate was found, in which
    /// case only the reconciliation half of the cycle ran.
    Applied {
        /// Topics this view was recorded against.
        recorded: usize,
        /// Tags added to the registry.
        added: usize,
        /// Tags removed from the registry.
        removed: usize,
    },
    /// The href matches the previous trigger; nothing was done.
    Duplicate,
    /// A collaborator failed; the cycle was discarded and logged.
    Failed,
}

/// The autotag engine.
///
/// Owns no state beyond the last-seen href (duplicate suppression); all
/// persistent state lives in the host's key-value store and tag registry,
/// injected at construction.
pub struct Autotag {
    filter: UrlFilter,
    extractor: TopicExtractor,
    views: ViewStore,
    scorer: DecayScorer,
    registry: Arc<dyn TagRegistry>,
    tag_prefix: String,
    /// Serializes cycles and carries the last-seen href.
    last_href: Mutex<Option<String>>,
}

impl Autotag {
    /// Build the engine, compiling all configured patterns.
    ///
    /// Fails fast on invalid allow/deny or topic patterns so
    /// misconfiguration never surfaces per view.
    pub fn new(
        config: AutotagConfig,
        store: Arc<dyn KeyValueStore>,
        registry: Arc<dyn TagRegistry>,
    ) -> Result<Self, AutotagError> {
        let filter = UrlFilter::new(&config.whitelist, &config.blacklist)?;
        let extractor = TopicExtractor::new(&config)?;
        let views = ViewStore::new(
            store,
            RetentionPolicy {
                max_views: config.max_views,
                max_view_age_ms: config.max_view_age_ms,
            },
        );
        let scorer = DecayScorer::new(
            config.age_mid_weight_ms,
            config.effective_min_views(),
            config.num_topics,
        );
        Ok(Self {
            filter,
            extractor,
            views,
            scorer,
            registry,
            tag_prefix: config.tag_prefix,
            last_href: Mutex::new(None),
        })
    }

    /// Handle one page-view trigger.
    ///
    /// Fired by the host once per distinct navigation and once on initial
    /// load completion. Never returns an error: a failed cycle is logged
    /// and reported as [`CycleOutcome::Failed`], leaving the next trigger
    /// free to retry fresh.
    #[instrument(skip_all, fields(href = %locator.href))]
    pub async fn handle_page_view(
        &self,
        locator: &PageLocator,
        snapshot: Option<&PageSnapshot>,
    ) -> CycleOutcome {
        let mut last_href = self.last_href.lock().await;
        if last_href.as_deref() == Some(locator.href.as_str()) {
            debug!("Duplicate trigger for unchanged href");
            return CycleOutcome::Duplicate;
        }
        *last_href = Some(locator.href.clone());

        match self.run_cycle(locator, snapshot).await {
            Ok(outcome) => outcome,
            Err(error) => {
                warn!(%error, "Page-view cycle discarded");
                CycleOutcome::Failed
            }
        }
    }

    /// The current favorite topics, ranked by decayed score.
    pub async fn favorite_topics(&self, now: Timestamp) -> Result<Vec<Topic>, AutotagError> {
        let views = self.views.load().await?;
        Ok(self.scorer.rank(&views, now))
    }

    async fn run_cycle(
        &self,
        locator: &PageLocator,
        snapshot: Option<&PageSnapshot>,
    ) -> Result<CycleOutcome, AutotagError> {
        let now = Utc::now().timestamp_millis();

        let recorded = if self.filter.accepts(&locator.href) {
            let topics = self.extractor.extract(locator, snapshot);
            if topics.is_empty() {
                debug!("No candidate topics for this view");
            } else {
                self.views.record(&topics, now).await?;
            }
            topics.len()
        } else {
            // The view itself is discarded, but old favorites may still
            // have decayed out, so reconciliation runs regardless.
            debug!("Href rejected by allow/deny filter");
            0
        };

        let favorites = self.favorite_topics(now).await?;
        let current_tags = self.registry.get_tags().await?;
        let delta = diff(&current_tags, &favorites, &self.tag_prefix);
        if !delta.is_empty() {
            self.registry
                .add_remove_tags(&delta.to_add, &delta.to_remove)
                .await?;
            info!(
                added = delta.to_add.len(),
                removed = delta.to_remove.len(),
                "Reconciled tags"
            );
        }

        Ok(CycleOutcome::Applied {
            recorded,
            added: delta.to_add.len(),
            removed: delta.to_remove.len(),
        })
    }
}
