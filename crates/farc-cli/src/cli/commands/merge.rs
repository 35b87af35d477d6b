//! `farc merge <bundle.json>..` – cross-session merge of exported bundles.

use anyhow::Result;
use farc_core::export::{merge_bundles, read_bundle, write_bundle, ExportOutcome};
use std::path::{Path, PathBuf};

pub fn run_merge(bundles: &[PathBuf], out: Option<&Path>) -> Result<()> {
    let mut loaded = Vec::with_capacity(bundles.len());
    for path in bundles {
        let bundle = read_bundle(path)?;
        println!("Loaded {} items from {}", bundle.total_items, path.display());
        loaded.push(bundle);
    }

    match merge_bundles(loaded) {
        ExportOutcome::Bundle(merged) => {
            let path = write_bundle(&merged, out.unwrap_or_else(|| Path::new(".")))?;
            println!("Merged into {} unique items at {}", merged.total_items, path.display());
        }
        ExportOutcome::Nothing => println!("Nothing to export."),
    }
    Ok(())
}
