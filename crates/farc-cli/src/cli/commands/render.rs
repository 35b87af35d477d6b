//! `farc render <metadata.json>` – generate the static HTML archive.

use anyhow::Result;
use farc_core::render::render_archive;
use std::path::Path;

pub fn run_render(metadata: &Path) -> Result<()> {
    let report = render_archive(metadata)?;
    println!(
        "Rendered {} items ({} posts, {} photos).",
        report.items, report.posts, report.photos
    );
    println!("Main archive: {}", report.index.display());
    println!("Posts only:   {}", report.posts_only.display());
    Ok(())
}
