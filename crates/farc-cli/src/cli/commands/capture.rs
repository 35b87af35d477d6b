//! `farc capture <url>..` – fetch feed pages through the tap and export.

use anyhow::Result;
use farc_core::capture::FeedRecorder;
use farc_core::config::FarcConfig;
use farc_core::export::{export_log, write_bundle, ExportOutcome};
use farc_core::intercept::{CurlExchange, FeedTap, HttpExchange, Request};
use std::path::Path;

use crate::cli::fetch_options;

pub fn run_capture(cfg: &FarcConfig, urls: &[String], out: Option<&Path>) -> Result<()> {
    let recorder = FeedRecorder::new();
    recorder.start();

    let tap = FeedTap::new(
        CurlExchange::new(fetch_options(cfg)),
        recorder.clone(),
        cfg.feed_url_marker.clone(),
    );

    for url in urls {
        match tap.execute(&Request::get(url)) {
            Ok(resp) => tracing::info!("fetched {} (HTTP {})", url, resp.status),
            Err(e) => tracing::warn!("fetch {} failed: {}", url, e),
        }
    }
    recorder.stop();

    let status = recorder.status(cfg.recent_urls);
    println!(
        "Captured {} responses with {} items.",
        status.responses, status.items
    );

    match export_log(&recorder.snapshot()) {
        ExportOutcome::Bundle(bundle) => {
            let path = write_bundle(&bundle, out.unwrap_or_else(|| Path::new(".")))?;
            println!("Exported {} unique items to {}", bundle.total_items, path.display());
        }
        ExportOutcome::Nothing => println!("Nothing to export."),
    }
    Ok(())
}
