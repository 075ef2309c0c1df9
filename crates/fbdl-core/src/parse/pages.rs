//! `fliphtml5_pages` identifier table.
//!
//! Newer uploads serve `config.js` as `var htmlConfig = {...};`: a JSON
//! document behind a fixed 17-byte declaration and a one-byte terminator.
//! Only that exact framing is supported; leading whitespace or a minified
//! declaration makes the probe fail, and the caller falls back to numeric
//! page names.

use crate::error::ParseError;
use serde_json::Value;

/// Length of the `var htmlConfig = ` declaration stripped before parsing.
pub const CONFIG_PREFIX_LEN: usize = 17;

fn malformed(reason: impl Into<String>) -> ParseError {
    ParseError::FallbackFormat(reason.into())
}

/// Extracts per-page image names from the `fliphtml5_pages` table.
///
/// Every entry must be an object whose `n` array starts with a string. Any
/// other shape, a missing table, or an empty table is
/// [`ParseError::FallbackFormat`].
pub fn probe_page_identifiers(text: &str) -> Result<Vec<String>, ParseError> {
    let end = text
        .len()
        .checked_sub(1)
        .filter(|end| *end >= CONFIG_PREFIX_LEN)
        .ok_or_else(|| malformed("config too short for variable framing"))?;
    let body = text
        .get(CONFIG_PREFIX_LEN..end)
        .ok_or_else(|| malformed("framing does not fall on character boundaries"))?;

    let doc: Value =
        serde_json::from_str(body).map_err(|e| malformed(format!("not a JSON document: {e}")))?;
    let pages = doc
        .as_object()
        .ok_or_else(|| malformed("top level is not an object"))?
        .get("fliphtml5_pages")
        .ok_or_else(|| malformed("no fliphtml5_pages"))?
        .as_array()
        .ok_or_else(|| malformed("fliphtml5_pages is not an array"))?;

    if pages.is_empty() {
        return Err(malformed("fliphtml5_pages is empty"));
    }

    pages
        .iter()
        .enumerate()
        .map(|(i, page)| {
            page.get("n")
                .and_then(Value::as_array)
                .and_then(|n| n.first())
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| malformed(format!("entry {i} has no string n[0]")))
        })
        .collect()
}
