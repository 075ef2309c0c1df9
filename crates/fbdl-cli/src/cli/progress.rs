//! Terminal progress bars for the download and OCR stages.

use fbdl_core::progress::ProgressSink;
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::RefCell;

const TEMPLATE: &str = "{msg:>12} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}";

/// One `indicatif` bar per stage, drawn on stderr.
#[derive(Default)]
pub struct BarProgress {
    bar: RefCell<Option<ProgressBar>>,
}

impl BarProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressSink for BarProgress {
    fn start(&self, label: &str, total: usize) {
        let pb = ProgressBar::new(total as u64);
        let style = ProgressStyle::with_template(TEMPLATE)
            .map(|s| s.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        pb.set_message(label.to_string());
        if let Some(previous) = self.bar.replace(Some(pb)) {
            previous.finish_and_clear();
        }
    }

    fn advance(&self) {
        if let Some(pb) = self.bar.borrow().as_ref() {
            pb.inc(1);
        }
    }

    fn finish(&self) {
        if let Some(pb) = self.bar.borrow_mut().take() {
            pb.finish();
        }
    }
}
