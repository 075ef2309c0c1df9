//! Page asset URL resolution.
//!
//! Two naming schemes exist on the asset host:
//! - numeric: `<host>/<c>/<d>/files/mobile/<i>.jpg` for `i` in `1..=page_count`
//! - identifier: `<host>/<c>/<d>/files/large/<id>` for each `fliphtml5_pages` name
//!
//! The resolver never checks that the URLs exist; that is the download loop's job.

use crate::parse::FlipbookMetadata;
use crate::reference::FlipbookReference;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fully-qualified page image location.
pub type PageUrl = String;

/// Page naming scheme on the asset host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// `files/mobile/<n>.jpg`, 1-based.
    Numeric,
    /// `files/large/<identifier>`, in `fliphtml5_pages` order.
    Identifier,
}

impl Scheme {
    /// The scheme tried when this one fails wholesale.
    pub fn other(self) -> Self {
        match self {
            Scheme::Numeric => Scheme::Identifier,
            Scheme::Identifier => Scheme::Numeric,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Numeric => write!(f, "numeric"),
            Scheme::Identifier => write!(f, "identifier"),
        }
    }
}

/// Which scheme a run starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemePreference {
    /// Identifier scheme when the config carries identifiers, numeric otherwise.
    #[default]
    Auto,
    Numeric,
    Identifier,
}

/// Builds page URLs on a given asset host.
#[derive(Debug, Clone)]
pub struct UrlResolver {
    asset_host: String,
}

impl UrlResolver {
    pub fn new(asset_host: impl Into<String>) -> Self {
        Self {
            asset_host: asset_host.into(),
        }
    }

    /// Scheme implied by the metadata alone.
    pub fn select_scheme(meta: &FlipbookMetadata) -> Scheme {
        if meta.page_identifiers.is_empty() {
            Scheme::Numeric
        } else {
            Scheme::Identifier
        }
    }

    /// Scheme to start with given a preference. A preference for the
    /// identifier scheme without identifiers falls back to numeric.
    pub fn initial_scheme(meta: &FlipbookMetadata, preference: SchemePreference) -> Scheme {
        match preference {
            SchemePreference::Auto => Self::select_scheme(meta),
            SchemePreference::Numeric => Scheme::Numeric,
            SchemePreference::Identifier if meta.page_identifiers.is_empty() => {
                tracing::warn!("identifier scheme requested but config has no page identifiers");
                Scheme::Numeric
            }
            SchemePreference::Identifier => Scheme::Identifier,
        }
    }

    /// Resolves every page with the scheme implied by `meta`.
    pub fn resolve(&self, reference: &FlipbookReference, meta: &FlipbookMetadata) -> Vec<PageUrl> {
        self.resolve_with(reference, meta, Self::select_scheme(meta))
            .unwrap_or_default()
    }

    /// Resolves every page with an explicit scheme.
    ///
    /// Returns `None` when the identifier scheme is asked for but `meta` has
    /// no identifiers.
    pub fn resolve_with(
        &self,
        reference: &FlipbookReference,
        meta: &FlipbookMetadata,
        scheme: Scheme,
    ) -> Option<Vec<PageUrl>> {
        match scheme {
            Scheme::Numeric => Some(
                (1..=meta.page_count)
                    .map(|i| {
                        let name = format!("{i}.jpg");
                        reference.join(&self.asset_host, &["files", "mobile", name.as_str()])
                    })
                    .collect(),
            ),
            Scheme::Identifier if meta.page_identifiers.is_empty() => None,
            Scheme::Identifier => Some(
                meta.page_identifiers
                    .iter()
                    .take(meta.page_count as usize)
                    .map(|id| reference.join(&self.asset_host, &["files", "large", id.as_str()]))
                    .collect(),
            ),
        }
    }
}
