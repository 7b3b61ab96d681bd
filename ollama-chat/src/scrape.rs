//! Pulls the assistant's text straight out of a raw response body.
//!
//! This is a fallback for bodies that are not worth decoding. It stops at
//! the first `"` so escaped quotes truncate the result.

use once_cell::sync::Lazy;
use regex::Regex;

static CONTENT_FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""content"\s*:\s*"([^"]+)""#).expect("content pattern is a valid regex")
});

/// Returns the first non-empty `"content": "..."` value in `raw`.
pub fn scrape_content(raw: &str) -> Option<&str> {
    CONTENT_FIELD
        .captures(raw)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}
