//! Text normalization
//!
//! The cleaning rule applied here is part of the model contract: the
//! vectorizer vocabulary was fitted on text cleaned exactly this way, so any
//! drift silently degrades accuracy.
//!
//! Steps (in order):
//! 1. Lowercase
//! 2. Strip URL-like runs (`http` followed by non-whitespace)
//! 3. Drop everything outside `a-z` and whitespace
//! 4. Collapse whitespace runs to a single space
//! 5. Trim

use regex::Regex;
use std::sync::OnceLock;

static URL_PATTERN: OnceLock<Regex> = OnceLock::new();
static NON_ALPHA_PATTERN: OnceLock<Regex> = OnceLock::new();
static WHITESPACE_PATTERN: OnceLock<Regex> = OnceLock::new();

fn url_pattern() -> &'static Regex {
    URL_PATTERN.get_or_init(|| Regex::new(r"http\S+").expect("valid regex"))
}

fn non_alpha_pattern() -> &'static Regex {
    NON_ALPHA_PATTERN.get_or_init(|| Regex::new(r"[^a-z\s]").expect("valid regex"))
}

fn whitespace_pattern() -> &'static Regex {
    WHITESPACE_PATTERN.get_or_init(|| Regex::new(r"\s+").expect("valid regex"))
}

/// Normalize raw article text for feature extraction.
///
/// Total over all inputs; empty input yields an empty string. The output
/// contains only `a-z` and single spaces, never leading or trailing space,
/// and `normalize(normalize(s)) == normalize(s)`.
pub fn normalize(raw: &str) -> String {
    let mut current = clean_once(raw);
    // Dropping non-letters can splice a new URL-like run together
    // ("ht1tp..." becomes "http..."), so repeat until nothing changes.
    // Every pass that changes clean text only deletes characters.
    loop {
        let next = clean_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn clean_once(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let without_urls = url_pattern().replace_all(&lowered, "");
    let letters_only = non_alpha_pattern().replace_all(&without_urls, "");
    let collapsed = whitespace_pattern().replace_all(&letters_only, " ");
    collapsed.trim().to_string()
}
