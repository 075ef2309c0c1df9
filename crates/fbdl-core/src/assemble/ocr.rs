//! OCR assembly through external tools.
//!
//! Each page goes through `tesseract <image> <base> pdf`, producing
//! `<base>.pdf` with an invisible text layer. The per-page PDFs are then
//! merged in order with `qpdf --empty --pages ... -- <output>`.

use crate::progress::ProgressSink;
use anyhow::{Context, Result};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Resolved paths of the OCR tool chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrTools {
    pub tesseract: PathBuf,
    pub qpdf: PathBuf,
}

impl OcrTools {
    /// Finds both tools on `PATH`.
    pub fn locate() -> Result<Self> {
        let tesseract = which::which("tesseract")
            .context("OCR requested but `tesseract` was not found on PATH")?;
        let qpdf =
            which::which("qpdf").context("OCR requested but `qpdf` was not found on PATH")?;
        tracing::debug!(tesseract = %tesseract.display(), qpdf = %qpdf.display(), "OCR tools located");
        Ok(Self { tesseract, qpdf })
    }
}

/// Arguments for one tesseract run; output lands at `<out_base>.pdf`.
pub fn tesseract_args(image: &Path, out_base: &Path) -> Vec<OsString> {
    vec![
        image.as_os_str().to_owned(),
        out_base.as_os_str().to_owned(),
        OsString::from("pdf"),
    ]
}

/// Arguments for merging `inputs` (in order) into `output`.
pub fn qpdf_args(inputs: &[PathBuf], output: &Path) -> Vec<OsString> {
    let mut args = vec![OsString::from("--empty"), OsString::from("--pages")];
    args.extend(inputs.iter().map(|p| p.as_os_str().to_owned()));
    args.push(OsString::from("--"));
    args.push(output.as_os_str().to_owned());
    args
}

fn run_tool(program: &Path, args: &[OsString]) -> Result<()> {
    tracing::debug!(program = %program.display(), ?args, "running");
    let out = Command::new(program)
        .args(args)
        .output()
        .with_context(|| format!("spawn {}", program.display()))?;
    if !out.status.success() {
        anyhow::bail!(
            "{} failed ({}): {}",
            program.display(),
            out.status,
            String::from_utf8_lossy(&out.stderr).trim()
        );
    }
    Ok(())
}

/// OCRs every image into `work_dir`, then merges into `output`.
pub fn build_ocr_pdf(
    tools: &OcrTools,
    images: &[PathBuf],
    work_dir: &Path,
    output: &Path,
    progress: &dyn ProgressSink,
) -> Result<()> {
    fs::create_dir_all(work_dir).with_context(|| format!("create {}", work_dir.display()))?;
    progress.start("OCR", images.len());

    let page_pdfs = ocr_pages(&tools.tesseract, images, work_dir, progress);
    progress.finish();

    run_tool(&tools.qpdf, &qpdf_args(&page_pdfs?, output))
}

/// Runs tesseract on each image in order, stopping at the first failure.
fn ocr_pages(
    tesseract: &Path,
    images: &[PathBuf],
    work_dir: &Path,
    progress: &dyn ProgressSink,
) -> Result<Vec<PathBuf>> {
    images
        .iter()
        .map(|image| -> Result<PathBuf> {
            let stem = image.file_stem().unwrap_or(image.as_os_str());
            let base = work_dir.join(stem);
            run_tool(tesseract, &tesseract_args(image, &base))?;
            progress.advance();
            Ok(base.with_extension("pdf"))
        })
        .collect()
}
