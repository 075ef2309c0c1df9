//! Book title strategies.

use super::extractor::{first_match, Extractor};
use regex::Regex;
use std::sync::OnceLock;

static RE_ASSIGNMENT: OnceLock<Regex> = OnceLock::new();
static RE_META: OnceLock<Regex> = OnceLock::new();

// A quoted body: anything but a bare quote, backslash escapes allowed.
fn re_assignment() -> &'static Regex {
    RE_ASSIGNMENT.get_or_init(|| {
        Regex::new(r#"\b(?:bookConfig\.)?bookTitle\s*=\s*"((?:[^"\\]|\\.)*)""#)
            .expect("compile RE_ASSIGNMENT")
    })
}

fn re_meta() -> &'static Regex {
    RE_META.get_or_init(|| {
        Regex::new(r#""meta"\s*:\s*\{\s*"title"\s*:\s*"((?:[^"\\]|\\.)*)""#)
            .expect("compile RE_META")
    })
}

/// Title strategies in priority order.
pub const TITLE_EXTRACTORS: &[Extractor<String>] = &[
    Extractor {
        name: "title-assignment",
        extract: assignment_title,
    },
    Extractor {
        name: "title-meta",
        extract: meta_title,
    },
];

/// `bookConfig.bookTitle="..."` or bare `bookTitle="..."`. Returned verbatim.
fn assignment_title(text: &str) -> Option<String> {
    let caps = re_assignment().captures(text)?;
    let title = caps.get(1)?.as_str();
    (!title.is_empty()).then(|| title.to_string())
}

/// `"meta":{"title":"..."}`. The value is a JSON string, so escapes are decoded.
fn meta_title(text: &str) -> Option<String> {
    let caps = re_meta().captures(text)?;
    let literal = caps.get(1)?.as_str();
    if literal.is_empty() {
        return None;
    }
    let decoded = serde_json::from_str::<String>(&format!("\"{literal}\""))
        .unwrap_or_else(|_| literal.to_string());
    Some(decoded)
}

/// First title any strategy finds; `None` is not an error.
pub fn extract_title(text: &str) -> Option<String> {
    first_match(TITLE_EXTRACTORS, text)
}
