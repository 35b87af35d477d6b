//! Export: flatten the capture log, dedup by item id, emit a bundle.
//!
//! Dedup is first-seen-wins over the log in completion order, preserving
//! within-response order. The log itself is never consumed or cleared, so
//! export can be repeated at any time.

mod writer;

pub use writer::{export_file_name, read_bundle, read_capture_log, write_bundle};

use std::collections::HashSet;

use crate::feed::{CapturedResponse, ExportBundle, FeedItem};

/// Result of an export request.
#[derive(Debug)]
pub enum ExportOutcome {
    Bundle(ExportBundle),
    /// The log held no items; no file should be written. An empty archive
    /// file would be misleading, so this is a notice, not an empty bundle.
    Nothing,
}

/// First-seen dedup by `feedItemId`, preserving relative order of kept items.
/// Items with no id cannot be deduplicated and are kept as they come.
pub fn dedup_items<I>(items: I) -> Vec<FeedItem>
where
    I: IntoIterator<Item = FeedItem>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut unique = Vec::new();
    for item in items {
        match item.id() {
            Some(id) => {
                if seen.insert(id) {
                    unique.push(item);
                }
            }
            None => unique.push(item),
        }
    }
    unique
}

/// Produces one self-consistent bundle from a capture log snapshot.
pub fn export_log(log: &[CapturedResponse]) -> ExportOutcome {
    let unique = dedup_items(log.iter().flat_map(|r| r.feed_items()));
    finish(unique, log.len())
}

/// Cross-session merge: runs the same first-seen dedup over the union of
/// previously exported bundles, in argument order. Merging the result with
/// itself is a no-op, so repeated exports across browser sessions compose.
pub fn merge_bundles(bundles: Vec<ExportBundle>) -> ExportOutcome {
    let count = bundles.len();
    let unique = dedup_items(bundles.into_iter().flat_map(|b| b.feed_items));
    finish(unique, count)
}

fn finish(unique: Vec<FeedItem>, sources: usize) -> ExportOutcome {
    if unique.is_empty() {
        tracing::info!("nothing to export");
        return ExportOutcome::Nothing;
    }
    tracing::info!("exporting {} unique items from {} sources", unique.len(), sources);
    ExportOutcome::Bundle(ExportBundle {
        export_date: chrono::Utc::now().to_rfc3339(),
        total_items: unique.len(),
        feed_items: unique,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resp(url: &str, items: Vec<serde_json::Value>) -> CapturedResponse {
        CapturedResponse::from_payload(url, json!({ "feedItems": items })).unwrap()
    }

    fn ids(bundle: &ExportBundle) -> Vec<String> {
        bundle.feed_items.iter().filter_map(|i| i.id()).collect()
    }

    #[test]
    fn overlapping_responses_dedup_first_seen() {
        let log = vec![
            resp("u1", vec![json!({"feedItemId": "a"}), json!({"feedItemId": "b", "body": "first"})]),
            resp("u2", vec![json!({"feedItemId": "b", "body": "second"}), json!({"feedItemId": "c"})]),
        ];
        let bundle = match export_log(&log) {
            ExportOutcome::Bundle(b) => b,
            ExportOutcome::Nothing => panic!("expected bundle"),
        };
        assert_eq!(ids(&bundle), vec!["a", "b", "c"]);
        assert_eq!(bundle.total_items, 3);
        // First-encountered copy wins; fields are not merged.
        assert_eq!(bundle.feed_items[1].0["body"], "first");
    }

    #[test]
    fn empty_log_exports_nothing() {
        assert!(matches!(export_log(&[]), ExportOutcome::Nothing));
    }

    #[test]
    fn export_does_not_consume_log() {
        let log = vec![resp("u1", vec![json!({"feedItemId": "a"})])];
        let first = export_log(&log);
        let second = export_log(&log);
        assert!(matches!(first, ExportOutcome::Bundle(_)));
        assert!(matches!(second, ExportOutcome::Bundle(_)));
    }

    #[test]
    fn items_without_id_are_kept() {
        let log = vec![resp("u1", vec![json!({"body": "x"}), json!({"body": "y"})])];
        let bundle = match export_log(&log) {
            ExportOutcome::Bundle(b) => b,
            ExportOutcome::Nothing => panic!("expected bundle"),
        };
        assert_eq!(bundle.total_items, 2);
    }

    #[test]
    fn merge_bundles_dedups_across_sessions() {
        let a = ExportBundle {
            export_date: "t1".into(),
            total_items: 2,
            feed_items: vec![
                FeedItem::from(json!({"feedItemId": "a"})),
                FeedItem::from(json!({"feedItemId": "b"})),
            ],
        };
        let b = ExportBundle {
            export_date: "t2".into(),
            total_items: 2,
            feed_items: vec![
                FeedItem::from(json!({"feedItemId": "b"})),
                FeedItem::from(json!({"feedItemId": "c"})),
            ],
        };
        let merged = match merge_bundles(vec![a.clone(), b]) {
            ExportOutcome::Bundle(m) => m,
            ExportOutcome::Nothing => panic!("expected bundle"),
        };
        assert_eq!(ids(&merged), vec!["a", "b", "c"]);

        // Idempotent: merging a bundle with itself changes nothing.
        let again = match merge_bundles(vec![a.clone(), a.clone()]) {
            ExportOutcome::Bundle(m) => m,
            ExportOutcome::Nothing => panic!("expected bundle"),
        };
        assert_eq!(ids(&again), ids(&a));
    }

    #[test]
    fn merge_of_empty_bundles_is_nothing() {
        assert!(matches!(merge_bundles(vec![]), ExportOutcome::Nothing));
    }
}
