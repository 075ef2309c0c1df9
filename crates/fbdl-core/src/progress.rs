//! Progress reporting hooks for the long-running stages (download, OCR).
//!
//! The core only counts steps; the CLI decides how to draw them.

/// Receives step counts from a stage. Implementations must be cheap.
pub trait ProgressSink {
    /// A stage named `label` with `total` steps begins.
    fn start(&self, label: &str, total: usize);
    /// One step finished.
    fn advance(&self);
    /// The stage ended (successfully or not).
    fn finish(&self);
}

/// Discards all progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn start(&self, _label: &str, _total: usize) {}
    fn advance(&self) {}
    fn finish(&self) {}
}
