//! Static HTML archive generation from `metadata.json`.
//!
//! Produces two self-contained pages next to the metadata file: `index.html`
//! with every item (observations inlined) and `posts-only.html` with
//! observation embeds filtered out. Both reference the `images/` directory
//! the downloader filled.

mod escape;
mod page;

pub use escape::escape_html;
pub use page::render_page;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::downloader::ArchiveMetadata;

/// Paths and counts from a render run.
#[derive(Debug)]
pub struct RenderReport {
    pub index: PathBuf,
    pub posts_only: PathBuf,
    pub items: usize,
    pub posts: usize,
    pub photos: usize,
}

/// Feed dates for display: "August 29, 2025 at 08:25 PM". Unparseable input
/// is shown raw rather than dropped.
pub fn format_display_date(raw: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.format("%B %d, %Y at %I:%M %p").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Renders both archive pages into the metadata file's directory.
pub fn render_archive(metadata_path: &Path) -> Result<RenderReport> {
    let bytes = fs::read(metadata_path)
        .with_context(|| format!("read metadata: {}", metadata_path.display()))?;
    let metadata: ArchiveMetadata = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse metadata JSON: {}", metadata_path.display()))?;

    let out_dir = metadata_path.parent().unwrap_or_else(|| Path::new("."));

    let index = out_dir.join("index.html");
    fs::write(&index, render_page(&metadata, false))
        .with_context(|| format!("write {}", index.display()))?;

    let posts_only = out_dir.join("posts-only.html");
    fs::write(&posts_only, render_page(&metadata, true))
        .with_context(|| format!("write {}", posts_only.display()))?;

    let posts = metadata
        .processed_items
        .iter()
        .filter(|i| !i.is_observation())
        .count();
    let photos: usize = metadata
        .processed_items
        .iter()
        .map(|i| i.images.len() + i.observation_images.len())
        .sum();

    tracing::info!(
        "rendered {} items ({} posts) with {} photos into {}",
        metadata.processed_items.len(),
        posts,
        photos,
        out_dir.display()
    );

    Ok(RenderReport {
        index,
        posts_only,
        items: metadata.processed_items.len(),
        posts,
        photos,
    })
}
