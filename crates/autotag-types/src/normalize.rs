//! Topic string normalization.
//!
//! Normalization defines topic identity: two raw strings that normalize to
//! the same value are the same topic.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalize a raw string into a topic key.
///
/// Steps, in order:
/// 1. NFD-decompose and drop combining marks (strips diacritics)
/// 2. lower-case
/// 3. collapse every run of characters outside `[a-z0-9]` to a single space
/// 4. trim
/// 5. join the remaining words with `-`
///
/// The function is idempotent: `normalize(normalize(s)) == normalize(s)`.
///
/// # Example
/// ```
/// use autotag_types::normalize;
///
/// assert_eq!(normalize("Été / Chaussures!"), "ete-chaussures");
/// assert_eq!(normalize("running shoes"), "running-shoes");
/// ```
pub fn normalize(raw: &str) -> String {
    let stripped: String = raw.nfd().filter(|c| !is_combining_mark(*c)).collect();

    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    for c in stripped.chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            current.push(c);
        } else if !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        words.push(current);
    }

    words.join("-")
}
