//! `fbdl download <url>` – fetch every page and write the PDF.

use crate::cli::progress::BarProgress;
use anyhow::Result;
use fbdl_core::config::FbdlConfig;
use fbdl_core::fetch::{CurlTransport, TransportOptions};
use fbdl_core::options::RunOptions;
use fbdl_core::pipeline::Pipeline;
use fbdl_core::resolver::SchemePreference;
use std::path::PathBuf;

/// Download flags after config defaults have been applied.
#[derive(Debug, Clone)]
pub struct DownloadArgs {
    pub title: Option<String>,
    pub auto_title: bool,
    pub ocr: bool,
    pub scheme: SchemePreference,
    pub temp_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub keep_images: bool,
}

impl From<DownloadArgs> for RunOptions {
    fn from(args: DownloadArgs) -> Self {
        RunOptions {
            title_override: args.title,
            auto_title: args.auto_title,
            ocr: args.ocr,
            scheme: args.scheme,
            temp_dir: args.temp_dir,
            output_dir: args.output_dir,
            keep_images: args.keep_images,
        }
    }
}

pub fn run_download(cfg: &FbdlConfig, url: &str, args: DownloadArgs) -> Result<()> {
    let options = RunOptions::from(args);
    let transport = CurlTransport::new(TransportOptions::from_config(cfg));
    let progress = BarProgress::new();
    let report = Pipeline::new(&transport, cfg, &progress).run(url, &options)?;
    println!(
        "Saved \"{}\" ({} pages, {} scheme) to {}",
        report.title,
        report.pages,
        report.scheme,
        report.output.display()
    );
    Ok(())
}
