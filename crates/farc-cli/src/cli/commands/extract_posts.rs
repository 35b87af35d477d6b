//! `farc extract-posts <metadata.json>` – copy post images to post_images/.

use anyhow::Result;
use farc_core::extract::extract_post_images;
use std::path::Path;

pub fn run_extract_posts(metadata: &Path) -> Result<()> {
    let report = extract_post_images(metadata)?;
    println!("Copied {} images, {} failed.", report.copied, report.failed);
    println!(
        "Post images: {} ({:.1} MB)",
        report.dest_dir.display(),
        report.total_bytes as f64 / (1024.0 * 1024.0)
    );
    Ok(())
}
