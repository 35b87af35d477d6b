//! Posts-only image extraction: copy the images referenced by regular posts
//! (observation embeds excluded) into a separate `post_images/` directory.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::downloader::ArchiveMetadata;

/// Outcome of an extraction run.
#[derive(Debug)]
pub struct ExtractReport {
    pub dest_dir: PathBuf,
    pub copied: usize,
    pub failed: usize,
    /// Total size of the copied files in bytes.
    pub total_bytes: u64,
}

/// Copies post images from `images/` to `post_images/` next to the metadata
/// file. Missing source files are counted as failures, not errors.
pub fn extract_post_images(metadata_path: &Path) -> Result<ExtractReport> {
    let bytes = fs::read(metadata_path)
        .with_context(|| format!("read metadata: {}", metadata_path.display()))?;
    let metadata: ArchiveMetadata = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse metadata JSON: {}", metadata_path.display()))?;

    let archive_dir = metadata_path.parent().unwrap_or_else(|| Path::new("."));
    let images_dir = archive_dir.join("images");
    let dest_dir = archive_dir.join("post_images");
    fs::create_dir_all(&dest_dir)
        .with_context(|| format!("create post images dir: {}", dest_dir.display()))?;

    let filenames: Vec<&str> = metadata
        .processed_items
        .iter()
        .filter(|i| !i.is_observation())
        .flat_map(|i| i.images.iter().map(|img| img.filename.as_str()))
        .collect();

    if filenames.is_empty() {
        tracing::warn!("no post images found to extract");
    }

    let mut copied = 0usize;
    let mut failed = 0usize;
    let mut total_bytes = 0u64;

    for filename in filenames {
        let source = images_dir.join(filename);
        let dest = dest_dir.join(filename);
        match fs::copy(&source, &dest) {
            Ok(n) => {
                copied += 1;
                total_bytes += n;
            }
            Err(e) => {
                tracing::warn!("error copying {}: {}", source.display(), e);
                failed += 1;
            }
        }
    }

    tracing::info!(
        "extracted {} post images ({} failed, {} bytes) into {}",
        copied,
        failed,
        total_bytes,
        dest_dir.display()
    );

    Ok(ExtractReport {
        dest_dir,
        copied,
        failed,
        total_bytes,
    })
}
