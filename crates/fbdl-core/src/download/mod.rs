//! Sequential page download loop.
//!
//! Writes page `i` (0-based) to `<dir>/<i:04>.<ext>`. Transient failures are
//! retried per [`RetryPolicy`]; the first hard failure stops the loop.

mod naming;

pub use naming::{page_extension, page_file_name};

use crate::error::FetchError;
use crate::fetch::Transport;
use crate::progress::ProgressSink;
use crate::resolver::PageUrl;
use crate::retry::{run_with_retry, RetryPolicy};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DownloadError {
    /// The very first page failed: nothing usable was fetched with this scheme.
    #[error("no page could be downloaded (first page {url}): {source}")]
    Wholesale {
        url: String,
        #[source]
        source: FetchError,
    },
    /// A later page failed after earlier pages succeeded.
    #[error("page {page} of {total} failed: {source}")]
    Page {
        page: usize,
        total: usize,
        #[source]
        source: FetchError,
    },
    #[error("write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DownloadError {
    /// Whether an alternate naming scheme is worth trying.
    pub fn is_wholesale(&self) -> bool {
        matches!(self, DownloadError::Wholesale { .. })
    }
}

/// Downloads `urls` in order into `dir`, creating it if needed.
///
/// Returns the written paths in page order.
pub fn download_pages(
    transport: &dyn Transport,
    urls: &[PageUrl],
    dir: &Path,
    policy: &RetryPolicy,
    progress: &dyn ProgressSink,
) -> Result<Vec<PathBuf>, DownloadError> {
    fs::create_dir_all(dir).map_err(|source| DownloadError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    progress.start("Downloading", urls.len());
    let result = fetch_all(transport, urls, dir, policy, progress);
    progress.finish();

    match &result {
        Ok(paths) => tracing::info!(pages = paths.len(), dir = %dir.display(), "pages downloaded"),
        Err(e) => tracing::warn!("page download stopped: {e}"),
    }
    result
}

fn fetch_all(
    transport: &dyn Transport,
    urls: &[PageUrl],
    dir: &Path,
    policy: &RetryPolicy,
    progress: &dyn ProgressSink,
) -> Result<Vec<PathBuf>, DownloadError> {
    let total = urls.len();
    let mut written = Vec::with_capacity(total);

    for (index, url) in urls.iter().enumerate() {
        let body = run_with_retry(policy, || transport.fetch(url)).map_err(|source| {
            if index == 0 {
                DownloadError::Wholesale {
                    url: url.clone(),
                    source,
                }
            } else {
                DownloadError::Page {
                    page: index + 1,
                    total,
                    source,
                }
            }
        })?;

        let path = dir.join(page_file_name(index, url));
        fs::write(&path, &body).map_err(|source| DownloadError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::trace!(page = index + 1, bytes = body.len(), path = %path.display(), "page saved");
        written.push(path);
        progress.advance();
    }

    Ok(written)
}
