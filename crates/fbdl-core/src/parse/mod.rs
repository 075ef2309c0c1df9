//! Metadata extraction from `config.js`.
//!
//! The viewer has shipped several encodings of the same configuration over the
//! years: legacy JavaScript assignments (`bookConfig.totalPageCount="3";`),
//! newer object literals (`"meta":{"title":...}`), and a JSON document
//! assigned to a variable that carries a `fliphtml5_pages` table. Each field
//! is pulled out by an ordered list of independent [`Extractor`]s; the first
//! one that matches wins.

mod extractor;
mod page_count;
mod pages;
mod title;

pub use extractor::{first_match, Extractor};
pub use page_count::{extract_page_count, MAX_PAGE_COUNT, PAGE_COUNT_EXTRACTORS};
pub use pages::{probe_page_identifiers, CONFIG_PREFIX_LEN};
pub use title::{extract_title, TITLE_EXTRACTORS};

use crate::error::ParseError;
use crate::fetch::RawConfig;

/// Fields the rest of the pipeline needs from `config.js`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlipbookMetadata {
    pub title: Option<String>,
    /// Always > 0.
    pub page_count: u32,
    /// Per-page image names from `fliphtml5_pages`; empty when that layout is
    /// absent. When non-empty it holds exactly `page_count` entries.
    pub page_identifiers: Vec<String>,
}

/// Parses raw config text.
///
/// Fails only when no page count can be found. A missing title or a missing
/// or malformed identifier table degrade to `None` / empty.
pub fn parse(raw: &RawConfig) -> Result<FlipbookMetadata, ParseError> {
    let text = raw.as_str();
    let page_count = extract_page_count(text)?;
    let title = extract_title(text);

    let page_identifiers = match probe_page_identifiers(text) {
        Ok(mut ids) if ids.len() >= page_count as usize => {
            ids.truncate(page_count as usize);
            ids
        }
        Ok(ids) => {
            tracing::warn!(
                identifiers = ids.len(),
                page_count,
                "page identifier table shorter than page count; ignoring it"
            );
            Vec::new()
        }
        Err(e) => {
            tracing::debug!("no page identifiers: {e}");
            Vec::new()
        }
    };

    tracing::debug!(
        ?title,
        page_count,
        identifiers = page_identifiers.len(),
        "parsed flipbook config"
    );
    Ok(FlipbookMetadata {
        title,
        page_count,
        page_identifiers,
    })
}
