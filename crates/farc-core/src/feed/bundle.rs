//! The export artifact: a deduplicated snapshot of captured feed items.

use serde::{Deserialize, Serialize};

use super::FeedItem;

/// Output of an export: unique feed items in first-seen order.
///
/// Invariants: `feedItemId` values are unique, `total_items` equals
/// `feed_items.len()`, and each item is the first-encountered copy of its id
/// (later duplicates are discarded whole, never merged field by field).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    /// ISO-8601 time the export was produced.
    pub export_date: String,
    /// Count of unique items; always `feed_items.len()`.
    pub total_items: usize,
    /// Unique items, first-seen order across the flattened capture log.
    pub feed_items: Vec<FeedItem>,
}
