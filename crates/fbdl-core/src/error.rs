//! Error taxonomy for metadata extraction.
//!
//! `FetchError` covers the network side (transport vs. remote status),
//! `ParseError` the config text. `FlipbookError` is what a run aborts with.

use thiserror::Error;

/// Failure while retrieving a single resource.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The retrieval itself could not complete (DNS, connection, TLS, timeout).
    #[error("transport error fetching {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: curl::Error,
    },
    /// The server answered with a non-2xx status.
    #[error("{url} returned HTTP {status}")]
    Remote { url: String, status: u32 },
    /// 2xx response with an empty body.
    #[error("{url} returned an empty body")]
    EmptyBody { url: String },
}

impl FetchError {
    pub fn url(&self) -> &str {
        match self {
            FetchError::Transport { url, .. }
            | FetchError::Remote { url, .. }
            | FetchError::EmptyBody { url } => url,
        }
    }
}

/// The config text did not match a recognized encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("page count not found")]
    PageCountNotFound,
    #[error("invalid page count: {0}")]
    InvalidPageCount(String),
    /// The `fliphtml5_pages` layout is absent or malformed. Only ever raised
    /// while probing for per-page identifiers; callers treat it as
    /// "fallback unavailable".
    #[error("page identifier list unavailable: {0}")]
    FallbackFormat(String),
}

impl ParseError {
    /// Whether this error must abort the run.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ParseError::FallbackFormat(_))
    }
}

/// Run-fatal failure while building a flipbook descriptor.
#[derive(Debug, Error)]
pub enum FlipbookError {
    #[error("invalid flipbook URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}
