//! End-to-end run: reference → config → metadata → descriptor → pages → PDF.
//!
//! Metadata resolution is all-or-nothing: any fatal error aborts before a
//! single page is requested. Page downloads get one second chance with the
//! other naming scheme when the first scheme fails wholesale.

use crate::assemble::{assemble_document, AssemblyMode};
use crate::config::FbdlConfig;
use crate::descriptor::FlipbookDescriptor;
use crate::download::{download_pages, DownloadError};
use crate::error::FlipbookError;
use crate::fetch::{fetch_config, Transport};
use crate::options::RunOptions;
use crate::parse::parse;
use crate::progress::ProgressSink;
use crate::reference::FlipbookReference;
use crate::resolver::{Scheme, UrlResolver};
use crate::retry::RetryPolicy;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub output: PathBuf,
    pub title: String,
    pub pages: usize,
    /// Scheme the pages were actually fetched with.
    pub scheme: Scheme,
}

/// One configured downloader. Borrowed pieces only; cheap to build per run.
pub struct Pipeline<'a> {
    transport: &'a dyn Transport,
    resolver: UrlResolver,
    config: &'a FbdlConfig,
    retry: RetryPolicy,
    progress: &'a dyn ProgressSink,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        transport: &'a dyn Transport,
        config: &'a FbdlConfig,
        progress: &'a dyn ProgressSink,
    ) -> Self {
        Self {
            transport,
            resolver: UrlResolver::new(config.service_host.clone()),
            config,
            retry: config.retry_policy(),
            progress,
        }
    }

    /// Resolves `url` into a descriptor without downloading any page.
    pub fn prepare(
        &self,
        url: &str,
        options: &RunOptions,
    ) -> Result<FlipbookDescriptor, FlipbookError> {
        let reference = FlipbookReference::parse(url)?;
        tracing::info!(%reference, "resolving flipbook");
        let raw = fetch_config(self.transport, &self.config.service_host, &reference)?;
        let metadata = parse(&raw)?;
        let descriptor = FlipbookDescriptor::assemble(reference, metadata, &self.resolver, options);
        tracing::info!(
            title = %descriptor.title,
            pages = descriptor.page_count(),
            scheme = %descriptor.scheme,
            "flipbook resolved"
        );
        Ok(descriptor)
    }

    /// Downloads every page of `url` and writes `<output_dir>/<name>.pdf`.
    pub fn run(&self, url: &str, options: &RunOptions) -> Result<RunReport> {
        let descriptor = self
            .prepare(url, options)
            .with_context(|| format!("resolve {url}"))?;
        // Fail on missing OCR tools before spending time on downloads.
        let mode = AssemblyMode::detect(options.ocr)?;

        let output_dir = options
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let stem = descriptor.file_stem();
        let image_dir = options
            .temp_dir
            .clone()
            .unwrap_or_else(|| output_dir.join(&stem));
        let created_image_dir = !image_dir.exists();

        let (descriptor, images) = self.download(descriptor, &image_dir)?;

        fs::create_dir_all(&output_dir)
            .with_context(|| format!("create {}", output_dir.display()))?;
        let output = output_dir.join(format!("{stem}.pdf"));
        let ocr_dir = image_dir.join("ocr");
        assemble_document(
            &mode,
            &images,
            &ocr_dir,
            &output,
            &descriptor.title,
            self.progress,
        )
        .with_context(|| format!("assemble {}", output.display()))?;

        if !options.keep_images {
            // The PDF may have been written inside the image folder.
            let remove_dir = created_image_dir && !contains(&image_dir, &output);
            clean_up(&image_dir, remove_dir, &images, &ocr_dir);
        }

        Ok(RunReport {
            output,
            title: descriptor.title,
            pages: images.len(),
            scheme: descriptor.scheme,
        })
    }

    /// Downloads with the descriptor's scheme, falling back to the other
    /// scheme once when nothing could be fetched.
    fn download(
        &self,
        descriptor: FlipbookDescriptor,
        dir: &Path,
    ) -> Result<(FlipbookDescriptor, Vec<PathBuf>)> {
        match self.download_with(&descriptor, dir) {
            Ok(images) => Ok((descriptor, images)),
            Err(err) if err.is_wholesale() => {
                let Some(alternate) = descriptor.with_other_scheme(&self.resolver) else {
                    return Err(err).context("download pages");
                };
                tracing::warn!(
                    failed = %descriptor.scheme,
                    next = %alternate.scheme,
                    "first page unavailable, retrying with the other scheme: {err}"
                );
                let images = self
                    .download_with(&alternate, dir)
                    .with_context(|| format!("download pages ({} scheme)", alternate.scheme))?;
                Ok((alternate, images))
            }
            Err(err) => Err(err).context("download pages"),
        }
    }

    fn download_with(
        &self,
        descriptor: &FlipbookDescriptor,
        dir: &Path,
    ) -> Result<Vec<PathBuf>, DownloadError> {
        download_pages(
            self.transport,
            &descriptor.page_urls,
            dir,
            &self.retry,
            self.progress,
        )
    }
}

/// Whether `path` lies inside `dir`. Paths that can't be resolved count as inside.
fn contains(dir: &Path, path: &Path) -> bool {
    match (fs::canonicalize(dir), fs::canonicalize(path)) {
        (Ok(dir), Ok(path)) => path.starts_with(dir),
        _ => true,
    }
}

/// Removes the page images. With `remove_dir` the whole folder goes;
/// otherwise only the files written into it.
fn clean_up(image_dir: &Path, remove_dir: bool, images: &[PathBuf], ocr_dir: &Path) {
    let result = if remove_dir {
        fs::remove_dir_all(image_dir)
    } else {
        images
            .iter()
            .try_for_each(fs::remove_file)
            .and_then(|()| match fs::remove_dir_all(ocr_dir) {
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                other => other,
            })
    };
    if let Err(e) = result {
        tracing::warn!(dir = %image_dir.display(), "failed to remove page images: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use crate::fetch::testing::MemoryTransport;
    use crate::progress::NoProgress;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    const HOST: &str = "https://online.anyflip.com";
    const VIEWER: &str = "https://online.anyflip.com/abcd/1234/mobile/index.html";
    const CONFIG: &str = "https://online.anyflip.com/abcd/1234/mobile/javascript/config.js";

    fn config() -> FbdlConfig {
        FbdlConfig {
            service_host: HOST.to_string(),
            ..FbdlConfig::default()
        }
    }

    fn jpeg() -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        RgbImage::from_pixel(4, 4, Rgb([1, 2, 3]))
            .write_to(&mut out, ImageFormat::Jpeg)
            .unwrap();
        out.into_inner()
    }

    fn numeric(i: usize) -> String {
        format!("{HOST}/abcd/1234/files/mobile/{i}.jpg")
    }

    fn options(out: &Path) -> RunOptions {
        RunOptions {
            output_dir: Some(out.to_path_buf()),
            ..RunOptions::default()
        }
    }

    const LEGACY: &str = r#"var bookConfig = {}; bookConfig.bookTitle="Sample Book"; bookConfig.totalPageCount=3;"#;

    const FLIPHTML5: &str = r#"var htmlConfig = {"meta":{"title":"Annual Report"},"bookConfig":{"totalPageCount":2},"fliphtml5_pages":[{"n":["p1.webp"]},{"n":["p2.webp"]}]};"#;

    #[test]
    fn prepare_resolves_numeric_book() {
        let t = MemoryTransport::new().with(CONFIG, 200, LEGACY);
        let cfg = config();
        let pipeline = Pipeline::new(&t, &cfg, &NoProgress);
        let d = pipeline.prepare(VIEWER, &RunOptions::default()).unwrap();
        assert_eq!(d.title, "Sample Book");
        assert_eq!(d.scheme, Scheme::Numeric);
        assert_eq!(d.page_urls, vec![numeric(1), numeric(2), numeric(3)]);
        assert_eq!(t.requests(), vec![CONFIG.to_string()]);
    }

    #[test]
    fn prepare_resolves_identifier_book() {
        let t = MemoryTransport::new().with(CONFIG, 200, FLIPHTML5);
        let cfg = config();
        let d = Pipeline::new(&t, &cfg, &NoProgress)
            .prepare(VIEWER, &RunOptions::default())
            .unwrap();
        assert_eq!(d.title, "Annual Report");
        assert_eq!(d.scheme, Scheme::Identifier);
        assert_eq!(
            d.page_urls,
            vec![
                format!("{HOST}/abcd/1234/files/large/p1.webp"),
                format!("{HOST}/abcd/1234/files/large/p2.webp"),
            ]
        );
    }

    #[test]
    fn missing_page_count_stops_after_config() {
        let t = MemoryTransport::new().with(CONFIG, 200, r#"bookConfig.bookTitle="X";"#);
        let cfg = config();
        let out = tempfile::tempdir().unwrap();
        let pipeline = Pipeline::new(&t, &cfg, &NoProgress);

        let err = pipeline.prepare(VIEWER, &RunOptions::default()).unwrap_err();
        assert!(matches!(err, FlipbookError::Parse(ParseError::PageCountNotFound)));

        assert!(pipeline.run(VIEWER, &options(out.path())).is_err());
        assert!(t.requests().iter().all(|r| r == CONFIG));
    }

    #[test]
    fn invalid_url_makes_no_request() {
        let t = MemoryTransport::new();
        let cfg = config();
        let err = Pipeline::new(&t, &cfg, &NoProgress)
            .prepare("https://online.anyflip.com/abcd", &RunOptions::default())
            .unwrap_err();
        assert!(matches!(err, FlipbookError::InvalidUrl { .. }));
        assert!(t.requests().is_empty());
    }

    #[test]
    fn remote_error_on_config_is_fatal() {
        let t = MemoryTransport::new().with(CONFIG, 404, "");
        let cfg = config();
        let err = Pipeline::new(&t, &cfg, &NoProgress)
            .prepare(VIEWER, &RunOptions::default())
            .unwrap_err();
        assert!(matches!(err, FlipbookError::Fetch(_)));
    }

    #[test]
    fn run_writes_pdf_and_removes_images() {
        let page = jpeg();
        let t = MemoryTransport::new()
            .with(CONFIG, 200, LEGACY)
            .with(&numeric(1), 200, page.clone())
            .with(&numeric(2), 200, page.clone())
            .with(&numeric(3), 200, page);
        let cfg = config();
        let out = tempfile::tempdir().unwrap();

        let report = Pipeline::new(&t, &cfg, &NoProgress)
            .run(VIEWER, &options(out.path()))
            .unwrap();
        assert_eq!(report.output, out.path().join("Sample Book.pdf"));
        assert_eq!(report.pages, 3);
        assert_eq!(report.scheme, Scheme::Numeric);
        assert!(report.output.is_file());
        assert!(!out.path().join("Sample Book").exists());
    }

    #[test]
    fn keep_images_leaves_page_files() {
        let t = MemoryTransport::new()
            .with(CONFIG, 200, LEGACY.replace("=3", "=1"))
            .with(&numeric(1), 200, jpeg());
        let cfg = config();
        let out = tempfile::tempdir().unwrap();
        let opts = RunOptions {
            keep_images: true,
            ..options(out.path())
        };
        Pipeline::new(&t, &cfg, &NoProgress).run(VIEWER, &opts).unwrap();
        assert!(out.path().join("Sample Book").join("0000.jpg").is_file());
    }

    #[test]
    fn existing_temp_dir_is_kept_but_emptied_of_pages() {
        let t = MemoryTransport::new()
            .with(CONFIG, 200, LEGACY.replace("=3", "=1"))
            .with(&numeric(1), 200, jpeg());
        let cfg = config();
        let out = tempfile::tempdir().unwrap();
        let scratch = tempfile::tempdir().unwrap();
        fs::write(scratch.path().join("notes.txt"), "mine").unwrap();
        let opts = RunOptions {
            temp_dir: Some(scratch.path().to_path_buf()),
            ..options(out.path())
        };
        Pipeline::new(&t, &cfg, &NoProgress).run(VIEWER, &opts).unwrap();
        assert!(scratch.path().join("notes.txt").is_file());
        assert!(!scratch.path().join("0000.jpg").exists());
    }

    #[test]
    fn new_folder_shared_with_output_keeps_pdf() {
        let t = MemoryTransport::new()
            .with(CONFIG, 200, LEGACY.replace("=3", "=1"))
            .with(&numeric(1), 200, jpeg());
        let cfg = config();
        let root = tempfile::tempdir().unwrap();
        let shared = root.path().join("out");
        let opts = RunOptions {
            temp_dir: Some(shared.clone()),
            ..options(&shared)
        };

        let report = Pipeline::new(&t, &cfg, &NoProgress).run(VIEWER, &opts).unwrap();
        assert_eq!(report.output, shared.join("Sample Book.pdf"));
        assert!(report.output.is_file());
        assert!(!shared.join("0000.jpg").exists());
    }

    #[test]
    fn new_folder_above_output_keeps_pdf() {
        let t = MemoryTransport::new()
            .with(CONFIG, 200, LEGACY.replace("=3", "=1"))
            .with(&numeric(1), 200, jpeg());
        let cfg = config();
        let root = tempfile::tempdir().unwrap();
        let pages = root.path().join("pages");
        let opts = RunOptions {
            temp_dir: Some(pages.clone()),
            ..options(&pages.join("pdf"))
        };

        let report = Pipeline::new(&t, &cfg, &NoProgress).run(VIEWER, &opts).unwrap();
        assert!(report.output.is_file());
        assert!(!pages.join("0000.jpg").exists());
    }

    #[test]
    fn wholesale_failure_switches_scheme() {
        let page = jpeg();
        let t = MemoryTransport::new()
            .with(CONFIG, 200, FLIPHTML5)
            .with(&numeric(1), 200, page.clone())
            .with(&numeric(2), 200, page);
        let cfg = config();
        let out = tempfile::tempdir().unwrap();

        let report = Pipeline::new(&t, &cfg, &NoProgress)
            .run(VIEWER, &options(out.path()))
            .unwrap();
        assert_eq!(report.scheme, Scheme::Numeric);
        assert_eq!(report.pages, 2);
        let requests = t.requests();
        assert_eq!(requests[1], format!("{HOST}/abcd/1234/files/large/p1.webp"));
        assert_eq!(requests[2], numeric(1));
    }

    #[test]
    fn wholesale_failure_without_alternative_is_fatal() {
        let t = MemoryTransport::new().with(CONFIG, 200, LEGACY);
        let cfg = config();
        let out = tempfile::tempdir().unwrap();
        let err = Pipeline::new(&t, &cfg, &NoProgress)
            .run(VIEWER, &options(out.path()))
            .unwrap_err();
        assert!(format!("{err:#}").contains("no page could be downloaded"));
        assert_eq!(t.requests().len(), 2);
    }

    #[test]
    fn partial_failure_does_not_switch_scheme() {
        let t = MemoryTransport::new()
            .with(CONFIG, 200, FLIPHTML5)
            .with(&format!("{HOST}/abcd/1234/files/large/p1.webp"), 200, jpeg());
        let cfg = config();
        let out = tempfile::tempdir().unwrap();
        let err = Pipeline::new(&t, &cfg, &NoProgress)
            .run(VIEWER, &options(out.path()))
            .unwrap_err();
        assert!(format!("{err:#}").contains("page 2 of 2"));
        assert!(!t.requests().contains(&numeric(1)));
    }
}
