//! Candidate-topic extraction from page views.
//!
//! Two mutually exclusive strategies, chosen at construction:
//! - **Topic list**: a configured list of known topics, each compiled into a
//!   case-insensitive word-boundary regex and matched against the page's
//!   content sources (href, title, first heading, meta tags).
//! - **URL position**: a single path segment of the URL (or the hostname for
//!   position 0), used when no topic list is configured.

use regex::Regex;

use autotag_types::{normalize, AutotagConfig, PageLocator, PageSnapshot, Topic};

use crate::error::AutotagError;

/// Path segments longer than this never become candidates.
const MAX_TOKEN_LEN: usize = 50;

/// Extracts zero or more normalized candidate topics from a page view.
pub struct TopicExtractor {
    strategy: Strategy,
}

enum Strategy {
    /// Index into the URL's path segments; 0 means the hostname.
    UrlPosition(usize),
    /// Configured topics with their compiled content matchers.
    TopicList(Vec<TopicMatcher>),
}

struct TopicMatcher {
    topic: Topic,
    pattern: Regex,
}

impl TopicExtractor {
    /// Build the extractor for the given configuration.
    ///
    /// Topic patterns are compiled once here; a configured topic is matched
    /// at word boundaries only (start/end of source or a non-alphanumeric
    /// neighbor), never as a substring of a longer word.
    pub fn new(config: &AutotagConfig) -> Result<Self, AutotagError> {
        let topics = config.deduped_topic_list();
        if topics.is_empty() {
            return Ok(Self {
                strategy: Strategy::UrlPosition(config.url_position),
            });
        }

        let matchers = topics
            .into_iter()
            .map(|raw| {
                let topic = normalize(&raw);
                let pattern = format!(
                    "(?i)(^|[^a-z0-9]){}([^a-z0-9]|$)",
                    regex::escape(&topic)
                );
                let pattern =
                    Regex::new(&pattern).map_err(|source| AutotagError::InvalidPattern {
                        pattern: raw.clone(),
                        source,
                    })?;
                Ok(TopicMatcher { topic, pattern })
            })
            .collect::<Result<Vec<_>, AutotagError>>()?;

        Ok(Self {
            strategy: Strategy::TopicList(matchers),
        })
    }

    /// Extract candidate topics for one page view.
    ///
    /// Candidates are deduplicated; order is discovery order (configured
    /// list order for the topic-list strategy, at most one candidate for
    /// the URL-position strategy).
    pub fn extract(&self, locator: &PageLocator, snapshot: Option<&PageSnapshot>) -> Vec<Topic> {
        match &self.strategy {
            Strategy::UrlPosition(position) => {
                extract_from_url(locator, *position).into_iter().collect()
            }
            Strategy::TopicList(matchers) => extract_from_content(matchers, locator, snapshot),
        }
    }
}

/// URL-position strategy: at most one candidate.
fn extract_from_url(locator: &PageLocator, position: usize) -> Option<Topic> {
    if position == 0 {
        return Some(normalize(&locator.hostname)).filter(|t| !t.is_empty());
    }

    let mut segments: Vec<&str> = locator.pathname.split('/').collect();
    if segments.first() == Some(&"") {
        segments.remove(0);
    }
    while segments.last() == Some(&"") {
        segments.pop();
    }

    // The path's leaf segment is never a candidate.
    if position + 1 >= segments.len() {
        return None;
    }
    let token = segments[position];
    if is_rejected_token(token) {
        return None;
    }
    Some(normalize(token)).filter(|t| !t.is_empty())
}

/// Reject all-numeric tokens, numeric `.html` leaves, and oversize tokens.
fn is_rejected_token(token: &str) -> bool {
    if token.len() > MAX_TOKEN_LEN {
        return true;
    }
    if all_digits(token) {
        return true;
    }
    matches!(token.strip_suffix(".html"), Some(stem) if all_digits(stem))
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Topic-list strategy: a configured topic is a candidate when its pattern
/// matches any content source.
fn extract_from_content(
    matchers: &[TopicMatcher],
    locator: &PageLocator,
    snapshot: Option<&PageSnapshot>,
) -> Vec<Topic> {
    let sources = content_sources(locator, snapshot);
    matchers
        .iter()
        .filter(|m| sources.iter().any(|source| m.pattern.is_match(source)))
        .map(|m| m.topic.clone())
        .collect()
}

/// Content sources in match order: normalized href, normalized title, raw
/// first-heading text, normalized meta contents. The heading stays raw; the
/// case-insensitive patterns match it regardless.
fn content_sources(locator: &PageLocator, snapshot: Option<&PageSnapshot>) -> Vec<String> {
    let mut sources = vec![normalize(&locator.href)];
    if let Some(snapshot) = snapshot {
        if let Some(title) = &snapshot.title {
            let title = normalize(title);
            if !title.is_empty() {
                sources.push(title);
            }
        }
        if let Some(heading) = &snapshot.first_heading {
            if !heading.is_empty() {
                sources.push(heading.clone());
            }
        }
        for content in &snapshot.meta_contents {
            let content = normalize(content);
            if !content.is_empty() {
                sources.push(content);
            }
        }
    }
    sources
}
