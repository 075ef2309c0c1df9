//! The resolved flipbook handed to the download and assembly stages.

use crate::options::RunOptions;
use crate::parse::FlipbookMetadata;
use crate::reference::{sanitize_output_name, FlipbookReference};
use crate::resolver::{PageUrl, Scheme, UrlResolver};

/// Everything the download pipeline needs, fully resolved.
#[derive(Debug, Clone)]
pub struct FlipbookDescriptor {
    pub reference: FlipbookReference,
    /// Chosen title, unsanitized.
    pub title: String,
    pub metadata: FlipbookMetadata,
    pub scheme: Scheme,
    /// One URL per page, first page first.
    pub page_urls: Vec<PageUrl>,
}

impl FlipbookDescriptor {
    /// Composes a descriptor. Title priority: explicit override, then the
    /// parsed title (when `auto_title` is on), then the document id.
    pub fn assemble(
        reference: FlipbookReference,
        metadata: FlipbookMetadata,
        resolver: &UrlResolver,
        options: &RunOptions,
    ) -> Self {
        let title = choose_title(
            options.title_override.as_deref(),
            metadata.title.as_deref(),
            options.auto_title,
            &reference,
        );
        let scheme = UrlResolver::initial_scheme(&metadata, options.scheme);
        let page_urls = resolver
            .resolve_with(&reference, &metadata, scheme)
            .unwrap_or_else(|| resolver.resolve(&reference, &metadata));
        Self {
            reference,
            title,
            metadata,
            scheme,
            page_urls,
        }
    }

    pub fn page_count(&self) -> usize {
        self.page_urls.len()
    }

    /// Filesystem-safe stem for the output document and image folder.
    pub fn file_stem(&self) -> String {
        let stem = sanitize_output_name(&self.title);
        if stem.is_empty() {
            sanitize_output_name(self.reference.default_name())
        } else {
            stem
        }
    }

    /// The same flipbook re-resolved with the other naming scheme, if the
    /// metadata supports it.
    pub fn with_other_scheme(&self, resolver: &UrlResolver) -> Option<Self> {
        let scheme = self.scheme.other();
        let page_urls = resolver.resolve_with(&self.reference, &self.metadata, scheme)?;
        Some(Self {
            scheme,
            page_urls,
            ..self.clone()
        })
    }
}

/// Override > parsed (if enabled) > reference default. Blank strings don't count.
pub fn choose_title(
    title_override: Option<&str>,
    parsed: Option<&str>,
    auto_title: bool,
    reference: &FlipbookReference,
) -> String {
    let non_blank = |s: &&str| !s.trim().is_empty();
    title_override
        .filter(non_blank)
        .or_else(|| parsed.filter(|_| auto_title).filter(non_blank))
        .unwrap_or_else(|| reference.default_name())
        .to_string()
}
