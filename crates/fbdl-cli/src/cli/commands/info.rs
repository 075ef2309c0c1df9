//! `fbdl info <url>` – resolve a flipbook and print what would be downloaded.

use anyhow::Result;
use fbdl_core::config::FbdlConfig;
use fbdl_core::fetch::{CurlTransport, TransportOptions};
use fbdl_core::options::RunOptions;
use fbdl_core::pipeline::Pipeline;
use fbdl_core::progress::NoProgress;

pub fn run_info(cfg: &FbdlConfig, url: &str) -> Result<()> {
    let transport = CurlTransport::new(TransportOptions::from_config(cfg));
    let descriptor =
        Pipeline::new(&transport, cfg, &NoProgress).prepare(url, &RunOptions::default())?;

    let reference = &descriptor.reference;
    println!("{:<10} {}", "SITE", reference.origin());
    println!(
        "{:<10} {}/{}",
        "BOOK",
        reference.collection(),
        reference.document()
    );
    println!("{:<10} {}", "TITLE", descriptor.title);
    println!("{:<10} {}.pdf", "FILE", descriptor.file_stem());
    println!("{:<10} {}", "PAGES", descriptor.page_count());
    println!("{:<10} {}", "SCHEME", descriptor.scheme);
    for (i, page_url) in descriptor.page_urls.iter().enumerate() {
        println!("{:<10} {}", i + 1, page_url);
    }
    Ok(())
}
