//! `farc status <capture-log.json>` – summarize a capture log file.

use anyhow::Result;
use farc_core::config::FarcConfig;
use farc_core::export::{dedup_items, read_capture_log};
use std::path::Path;

pub fn run_status(cfg: &FarcConfig, log: &Path) -> Result<()> {
    let responses = read_capture_log(log)?;
    let items: usize = responses.iter().map(|r| r.item_count()).sum();
    let unique = dedup_items(responses.iter().flat_map(|r| r.feed_items())).len();

    println!("Capture log: {}", log.display());
    println!("  responses:    {}", responses.len());
    println!("  items:        {}", items);
    println!("  unique items: {}", unique);

    let skip = responses.len().saturating_sub(cfg.recent_urls);
    if !responses.is_empty() {
        println!("  recent URLs:");
        for r in responses.iter().skip(skip) {
            println!("    {} ({})", r.url, r.timestamp);
        }
    }
    Ok(())
}
