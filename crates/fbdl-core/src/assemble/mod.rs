//! Turning downloaded page images into a single PDF.
//!
//! Plain mode writes the PDF directly with `lopdf`. OCR mode shells out to
//! `tesseract` (one searchable PDF per page) and merges with `qpdf`.

mod ocr;
mod pdf;

pub use ocr::{build_ocr_pdf, qpdf_args, tesseract_args, OcrTools};
pub use pdf::{build_image_pdf, PageImage};

use crate::progress::ProgressSink;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// How the output document is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssemblyMode {
    /// Images only.
    Plain,
    /// Searchable text layer via tesseract + qpdf.
    Ocr(OcrTools),
}

impl AssemblyMode {
    /// `Ocr` when requested and the tools are on `PATH`; an error when requested but missing.
    pub fn detect(ocr: bool) -> Result<Self> {
        if ocr {
            Ok(AssemblyMode::Ocr(OcrTools::locate()?))
        } else {
            Ok(AssemblyMode::Plain)
        }
    }
}

/// Writes `images` (in order) to `output` as one PDF.
///
/// `work_dir` holds OCR intermediates; it is created if missing.
pub fn assemble_document(
    mode: &AssemblyMode,
    images: &[PathBuf],
    work_dir: &Path,
    output: &Path,
    title: &str,
    progress: &dyn ProgressSink,
) -> Result<()> {
    if images.is_empty() {
        anyhow::bail!("no page images to assemble");
    }
    match mode {
        AssemblyMode::Plain => build_image_pdf(images, output, title),
        AssemblyMode::Ocr(tools) => build_ocr_pdf(tools, images, work_dir, output, progress),
    }?;
    tracing::info!(output = %output.display(), pages = images.len(), "document written");
    Ok(())
}
