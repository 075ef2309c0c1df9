//! Per-run options, passed explicitly through fetch → parse → resolve → download.

use crate::resolver::SchemePreference;
use std::path::PathBuf;

/// Immutable knobs for one run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Explicit output name; wins over any parsed title.
    pub title_override: Option<String>,
    /// Use the title found in `config.js` when no override is given.
    pub auto_title: bool,
    /// Produce a searchable PDF through tesseract + qpdf.
    pub ocr: bool,
    pub scheme: SchemePreference,
    /// Folder for the downloaded page images. Defaults to `<output_dir>/<name>`.
    pub temp_dir: Option<PathBuf>,
    /// Where the PDF lands. Defaults to the current directory.
    pub output_dir: Option<PathBuf>,
    /// Leave the page images on disk after assembly.
    pub keep_images: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            title_override: None,
            auto_title: true,
            ocr: false,
            scheme: SchemePreference::Auto,
            temp_dir: None,
            output_dir: None,
            keep_images: false,
        }
    }
}
