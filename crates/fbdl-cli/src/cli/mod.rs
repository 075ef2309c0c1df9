//! CLI for fbdl, the flipbook downloader.

mod commands;
mod progress;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use fbdl_core::config::{self, FbdlConfig};
use fbdl_core::resolver::SchemePreference;
use std::path::PathBuf;

use commands::{run_download, run_info, DownloadArgs};

/// Top-level CLI for fbdl.
#[derive(Debug, Parser)]
#[command(name = "fbdl", version)]
#[command(about = "fbdl: download online flipbooks as PDF", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Page naming scheme to start with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchemeArg {
    /// Identifiers when the config lists them, numbered pages otherwise.
    Auto,
    /// `files/mobile/<n>.jpg`.
    Numeric,
    /// `files/large/<id>`.
    Identifier,
}

impl From<SchemeArg> for SchemePreference {
    fn from(arg: SchemeArg) -> Self {
        match arg {
            SchemeArg::Auto => SchemePreference::Auto,
            SchemeArg::Numeric => SchemePreference::Numeric,
            SchemeArg::Identifier => SchemePreference::Identifier,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download a flipbook and assemble it into a PDF.
    Download {
        /// Flipbook viewer URL, e.g. https://online.anyflip.com/abcd/1234/mobile/index.html
        url: String,

        /// Output name (without extension). Wins over the title found online.
        #[arg(long, value_name = "TITLE")]
        title: Option<String>,

        /// Name the output after the document id instead of the online title.
        #[arg(long)]
        no_auto_title: bool,

        /// Add a searchable text layer (needs tesseract and qpdf on PATH).
        #[arg(long, overrides_with = "no_ocr")]
        ocr: bool,

        /// Skip OCR even if the config file enables it.
        #[arg(long, overrides_with = "ocr")]
        no_ocr: bool,

        /// Page naming scheme to try first.
        #[arg(long, value_enum, default_value_t = SchemeArg::Auto)]
        scheme: SchemeArg,

        /// Folder for the downloaded page images (default: <output-dir>/<name>).
        #[arg(long = "temp-download-folder", value_name = "DIR")]
        temp_dir: Option<PathBuf>,

        /// Where to write the PDF (default: current directory).
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Keep the page images after the PDF is written.
        #[arg(long)]
        keep_images: bool,

        /// Skip TLS certificate verification.
        #[arg(long)]
        insecure: bool,
    },

    /// Show title, page count, and page URLs without downloading pages.
    Info {
        /// Flipbook viewer URL.
        url: String,

        /// Skip TLS certificate verification.
        #[arg(long)]
        insecure: bool,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let mut cfg = config::load()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Download {
                url,
                title,
                no_auto_title,
                ocr,
                no_ocr,
                scheme,
                temp_dir,
                output_dir,
                keep_images,
                insecure,
            } => {
                apply_insecure(&mut cfg, insecure);
                let args = DownloadArgs {
                    title,
                    auto_title: !no_auto_title,
                    ocr: resolve_ocr(ocr, no_ocr, cfg.ocr),
                    scheme: scheme.into(),
                    temp_dir,
                    output_dir,
                    keep_images,
                };
                run_download(&cfg, &url, args)?;
            }
            CliCommand::Info { url, insecure } => {
                apply_insecure(&mut cfg, insecure);
                run_info(&cfg, &url)?;
            }
        }

        Ok(())
    }
}

/// `--insecure` can only loosen what the config file says.
fn apply_insecure(cfg: &mut FbdlConfig, insecure: bool) {
    cfg.insecure |= insecure;
}

/// Explicit flag first, then the config file default.
fn resolve_ocr(ocr: bool, no_ocr: bool, configured: bool) -> bool {
    match (ocr, no_ocr) {
        (true, _) => true,
        (_, true) => false,
        _ => configured,
    }
}

#[cfg(test)]
mod tests;
