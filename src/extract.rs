// src/extract.rs - Email extraction from raw page text
use std::collections::HashSet;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}")
        .expect("email regex is valid")
});

/// Scan raw text (HTML source, not a parsed DOM) for email-like tokens.
///
/// Matches are returned exactly as they appear in the source, deduplicated but
/// not case folded.
pub fn extract_emails(page_text: &str) -> HashSet<String> {
    EMAIL_REGEX
        .find_iter(page_text)
        .map(|m| m.as_str().to_string())
        .collect()
}
