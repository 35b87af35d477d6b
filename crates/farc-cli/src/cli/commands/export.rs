//! `farc export <capture-log.json>..` – offline export of capture logs.

use anyhow::Result;
use farc_core::export::{export_log, read_capture_log, write_bundle, ExportOutcome};
use farc_core::feed::CapturedResponse;
use std::path::{Path, PathBuf};

pub fn run_export(logs: &[PathBuf], out: Option<&Path>) -> Result<()> {
    // Logs concatenate in argument order; dedup handles overlap between them.
    let mut combined: Vec<CapturedResponse> = Vec::new();
    for path in logs {
        let mut log = read_capture_log(path)?;
        println!("Loaded {} responses from {}", log.len(), path.display());
        combined.append(&mut log);
    }

    match export_log(&combined) {
        ExportOutcome::Bundle(bundle) => {
            let path = write_bundle(&bundle, out.unwrap_or_else(|| Path::new(".")))?;
            println!("Exported {} unique items to {}", bundle.total_items, path.display());
        }
        ExportOutcome::Nothing => println!("Nothing to export."),
    }
    Ok(())
}
