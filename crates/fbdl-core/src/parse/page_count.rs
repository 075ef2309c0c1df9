//! Page count strategies.

use super::extractor::{first_match, Extractor};
use crate::error::ParseError;
use regex::Regex;
use std::sync::OnceLock;

/// Largest page count accepted from a config; anything above is treated as corrupt.
pub const MAX_PAGE_COUNT: u32 = 100_000;

static RE_ASSIGNMENT: OnceLock<Regex> = OnceLock::new();
static RE_PROPERTY: OnceLock<Regex> = OnceLock::new();

fn re_assignment() -> &'static Regex {
    RE_ASSIGNMENT.get_or_init(|| {
        Regex::new(r#"\b(?:bookConfig\.)?totalPageCount\s*=\s*"?([0-9]+)"?"#)
            .expect("compile RE_ASSIGNMENT")
    })
}

// Key may be quoted (`"totalPageCount":"12"`) or not (`totalPageCount:12`).
fn re_property() -> &'static Regex {
    RE_PROPERTY.get_or_init(|| {
        Regex::new(r#"\b(?:bookConfig\.)?totalPageCount"?\s*:\s*"?([0-9]+)"?"#)
            .expect("compile RE_PROPERTY")
    })
}

/// Page count strategies in priority order. Each yields the raw digit run.
pub const PAGE_COUNT_EXTRACTORS: &[Extractor<String>] = &[
    Extractor {
        name: "page-count-assignment",
        extract: assignment_digits,
    },
    Extractor {
        name: "page-count-property",
        extract: property_digits,
    },
];

fn assignment_digits(text: &str) -> Option<String> {
    re_assignment()
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

fn property_digits(text: &str) -> Option<String> {
    re_property()
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Finds `totalPageCount` in any known form and converts it to a positive integer.
pub fn extract_page_count(text: &str) -> Result<u32, ParseError> {
    let digits = first_match(PAGE_COUNT_EXTRACTORS, text).ok_or(ParseError::PageCountNotFound)?;
    parse_count(&digits)
}

/// Plain ASCII digits only; zero and anything above [`MAX_PAGE_COUNT`] are rejected.
fn parse_count(digits: &str) -> Result<u32, ParseError> {
    let digits = digits.trim_matches('"');
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidPageCount(digits.to_string()));
    }
    match digits.parse::<u32>() {
        Ok(n @ 1..=MAX_PAGE_COUNT) => Ok(n),
        _ => Err(ParseError::InvalidPageCount(digits.to_string())),
    }
}
