//! CLI command handlers, one file per subcommand.

mod download;
mod info;

pub use download::{run_download, DownloadArgs};
pub use info::run_info;
