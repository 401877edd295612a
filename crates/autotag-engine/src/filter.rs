//! Allow/deny filtering of page URLs.
//!
//! The filter gates whether a page view is recorded at all; it applies to
//! the raw href, never to extracted topics. Deny patterns always win over
//! allow patterns.

use regex::Regex;

use crate::error::AutotagError;

/// Compiled allow/deny lists for page hrefs.
#[derive(Debug)]
pub struct UrlFilter {
    allow: Vec<Regex>,
    deny: Vec<Regex>,
}

impl UrlFilter {
    /// Compile the configured patterns.
    ///
    /// Fails fast on the first invalid pattern so misconfiguration surfaces
    /// at construction, not per view.
    pub fn new(whitelist: &[String], blacklist: &[String]) -> Result<Self, AutotagError> {
        Ok(Self {
            allow: compile_all(whitelist)?,
            deny: compile_all(blacklist)?,
        })
    }

    /// Whether a view of this href should be counted.
    ///
    /// A deny match rejects outright; otherwise a non-empty allow list must
    /// match at least once. With both lists empty every href passes.
    pub fn accepts(&self, href: &str) -> bool {
        if self.deny.iter().any(|re| re.is_match(href)) {
            return false;
        }
        if !self.allow.is_empty() {
            return self.allow.iter().any(|re| re.is_match(href));
        }
        true
    }
}

fn compile_all(patterns: &[String]) -> Result<Vec<Regex>, AutotagError> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern).map_err(|source| AutotagError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })
        })
        .collect()
}
