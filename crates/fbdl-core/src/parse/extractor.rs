//! Ordered field-extraction strategies.

/// One way of finding a field in config text. Yields `None` on no match.
#[derive(Clone, Copy)]
pub struct Extractor<T> {
    /// Short label used in debug logs.
    pub name: &'static str,
    pub extract: fn(&str) -> Option<T>,
}

impl<T> std::fmt::Debug for Extractor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Extractor").field("name", &self.name).finish()
    }
}

/// Runs `extractors` in order and returns the first hit.
pub fn first_match<T>(extractors: &[Extractor<T>], text: &str) -> Option<T> {
    extractors.iter().find_map(|e| {
        let hit = (e.extract)(text);
        if hit.is_some() {
            tracing::debug!(extractor = e.name, "matched");
        }
        hit
    })
}
