//! Reading and writing export artifacts.
//!
//! A capture log file is a JSON array of captured responses (a recorder
//! snapshot serialized as-is); a bundle file is the pretty-printed export
//! artifact named after the export time, e.g. `famly_feed_2025-08-29_20h25m.json`.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

use crate::feed::{CapturedResponse, ExportBundle};

/// File name for a bundle exported at `now`. The stamp is reused later to
/// name the archive directory.
pub fn export_file_name(now: DateTime<Local>) -> String {
    format!("famly_feed_{}.json", now.format("%Y-%m-%d_%Hh%Mm"))
}

/// Writes a bundle as pretty-printed JSON into `dir`, named with the current
/// date. Returns the path of the written file.
pub fn write_bundle(bundle: &ExportBundle, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("create export dir: {}", dir.display()))?;
    let path = dir.join(export_file_name(Local::now()));
    let text = serde_json::to_string_pretty(bundle)?;
    fs::write(&path, text)
        .with_context(|| format!("write export file: {}", path.display()))?;
    tracing::info!("wrote {} items to {}", bundle.total_items, path.display());
    Ok(path)
}

/// Reads a capture log file (JSON array of captured responses).
pub fn read_capture_log(path: &Path) -> Result<Vec<CapturedResponse>> {
    let bytes = fs::read(path)
        .with_context(|| format!("read capture log: {}", path.display()))?;
    let log: Vec<CapturedResponse> = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse capture log JSON: {}", path.display()))?;
    Ok(log)
}

/// Reads a previously exported bundle.
pub fn read_bundle(path: &Path) -> Result<ExportBundle> {
    let bytes = fs::read(path)
        .with_context(|| format!("read bundle: {}", path.display()))?;
    let bundle: ExportBundle = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse bundle JSON: {}", path.display()))?;
    Ok(bundle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::FeedItem;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn file_name_stamp_format() {
        let t = Local.with_ymd_and_hms(2025, 8, 29, 20, 25, 7).unwrap();
        assert_eq!(export_file_name(t), "famly_feed_2025-08-29_20h25m.json");
    }

    #[test]
    fn bundle_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = ExportBundle {
            export_date: "2025-08-29T10:00:00+00:00".into(),
            total_items: 1,
            feed_items: vec![FeedItem::from(json!({"feedItemId": "a", "body": "hi"}))],
        };
        let path = write_bundle(&bundle, dir.path()).unwrap();
        assert!(path.file_name().unwrap().to_str().unwrap().starts_with("famly_feed_"));

        let back = read_bundle(&path).unwrap();
        assert_eq!(back.total_items, 1);
        assert_eq!(back.feed_items[0].0["body"], "hi");
    }

    #[test]
    fn capture_log_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let log = vec![CapturedResponse::from_payload(
            "https://x/api/feed/feed",
            json!({"feedItems": [{"feedItemId": "a"}]}),
        )
        .unwrap()];
        let path = dir.path().join("capture.json");
        fs::write(&path, serde_json::to_string_pretty(&log).unwrap()).unwrap();

        let back = read_capture_log(&path).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back[0].url, "https://x/api/feed/feed");
    }
}
