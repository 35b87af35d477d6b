//! `farc download <feed.json>` – download all images and write metadata.

use anyhow::Result;
use farc_core::config::FarcConfig;
use farc_core::downloader::{run_download as download, DownloadOptions, DownloadReport};
use std::path::{Path, PathBuf};

use crate::cli::{fetch_options, retry_policy};

pub fn run_download(cfg: &FarcConfig, feed: &Path, out: Option<PathBuf>) -> Result<DownloadReport> {
    let options = DownloadOptions {
        out_dir: out,
        fetch: fetch_options(cfg),
        retry: retry_policy(cfg),
    };
    let report = download(feed, &options)?;
    println!(
        "Downloaded {} photos ({} failed) from {} items.",
        report.photos, report.failed, report.items
    );
    println!("Archive: {}", report.archive_dir.display());
    println!("Metadata: {}", report.metadata_path.display());
    Ok(report)
}
