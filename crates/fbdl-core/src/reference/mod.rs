//! Flipbook references: the normalized `(collection, document)` pair.
//!
//! Viewer links come in many shapes (`/abcd/1234/`,
//! `/abcd/1234/mobile/index.html`, `/abcd/1234/basic?from=share`). All of them
//! collapse to the same reference; every config and asset URL is derived from it.

mod sanitize;

pub use sanitize::sanitize_output_name;

use crate::error::FlipbookError;
use std::fmt;
use url::Url;

/// Normalized flipbook identity. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlipbookReference {
    /// `scheme://host[:port]` of the URL the reference was parsed from.
    origin: String,
    collection: String,
    document: String,
}

impl FlipbookReference {
    /// Parses a viewer (or asset) URL, keeping only the first two path segments.
    ///
    /// Query strings, fragments, and any further segments (`mobile/index.html`,
    /// `files/large/x.jpg`, ...) are dropped.
    pub fn parse(input: &str) -> Result<Self, FlipbookError> {
        let invalid = |reason: &str| FlipbookError::InvalidUrl {
            url: input.to_string(),
            reason: reason.to_string(),
        };

        let url = Url::parse(input.trim()).map_err(|e| invalid(&e.to_string()))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(invalid("expected an http or https URL"));
        }
        if url.host_str().is_none() {
            return Err(invalid("missing host"));
        }

        let mut segments = url
            .path_segments()
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty());
        let collection = segments
            .next()
            .ok_or_else(|| invalid("missing collection id"))?;
        let document = segments
            .next()
            .ok_or_else(|| invalid("missing document id"))?;

        Ok(Self {
            origin: url.origin().ascii_serialization(),
            collection: collection.to_string(),
            document: document.to_string(),
        })
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    /// Absolute path of the flipbook root, e.g. `/abcd/1234`.
    pub fn path(&self) -> String {
        format!("/{}/{}", self.collection, self.document)
    }

    /// Name used when no title is available: the document id.
    pub fn default_name(&self) -> &str {
        &self.document
    }

    /// Joins `base` (a service host such as `https://online.anyflip.com`),
    /// the reference path, and `tail` segments into one URL.
    pub fn join(&self, base: &str, tail: &[&str]) -> String {
        let mut out = format!("{}{}", base.trim_end_matches('/'), self.path());
        for segment in tail {
            out.push('/');
            out.push_str(segment.trim_matches('/'));
        }
        out
    }

    /// Location of the mobile viewer's `config.js` on `base`.
    pub fn config_url(&self, base: &str) -> String {
        self.join(base, &["mobile", "javascript", "config.js"])
    }
}

impl fmt::Display for FlipbookReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.origin, self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_mobile_suffix() {
        let r = FlipbookReference::parse("https://online.anyflip.com/abcd/1234/mobile/index.html")
            .unwrap();
        assert_eq!(r.collection(), "abcd");
        assert_eq!(r.document(), "1234");
        assert_eq!(r.path(), "/abcd/1234");
        assert_eq!(r.origin(), "https://online.anyflip.com");
        assert_eq!(r.to_string(), "https://online.anyflip.com/abcd/1234");
    }

    #[test]
    fn strips_query_fragment_and_extra_segments() {
        let inputs = [
            "https://online.anyflip.com/abcd/1234",
            "https://online.anyflip.com/abcd/1234/",
            "https://online.anyflip.com/abcd/1234/basic?from=share#p=3",
            "https://online.anyflip.com//abcd//1234/basic/51-100",
            "  https://online.anyflip.com/abcd/1234/mobile/index.html  ",
        ];
        for input in inputs {
            let r = FlipbookReference::parse(input).unwrap();
            assert_eq!(r.path(), "/abcd/1234", "input {input}");
        }
    }

    #[test]
    fn rejects_short_paths() {
        assert!(FlipbookReference::parse("https://online.anyflip.com/").is_err());
        assert!(FlipbookReference::parse("https://online.anyflip.com/abcd").is_err());
    }

    #[test]
    fn rejects_non_http() {
        assert!(FlipbookReference::parse("ftp://online.anyflip.com/abcd/1234").is_err());
        assert!(FlipbookReference::parse("not a url").is_err());
    }

    #[test]
    fn config_url_uses_service_host() {
        let r = FlipbookReference::parse("https://anyflip.com/abcd/1234/").unwrap();
        assert_eq!(
            r.config_url("https://online.anyflip.com/"),
            "https://online.anyflip.com/abcd/1234/mobile/javascript/config.js"
        );
    }

    #[test]
    fn default_name_is_document_id() {
        let r = FlipbookReference::parse("https://online.anyflip.com/abcd/1234/mobile/").unwrap();
        assert_eq!(r.default_name(), "1234");
    }
}
