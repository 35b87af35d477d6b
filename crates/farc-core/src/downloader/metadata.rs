//! On-disk shapes: the exported feed file consumed by the downloader and the
//! `metadata.json` it produces for the renderer.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::feed::FeedItem;

/// Exported feed file as the downloader reads it. Lenient: every field is
/// optional so hand-merged exports still load.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedExport {
    #[serde(default)]
    pub feed_items: Vec<FeedItem>,
    /// Observation records referenced by observation embeds, keyed by `id`.
    #[serde(default)]
    pub observations: Vec<Value>,
    #[serde(default)]
    pub export_date: Option<String>,
}

impl FeedExport {
    /// Observation lookup by id.
    pub fn observation_map(&self) -> HashMap<String, Value> {
        self.observations
            .iter()
            .filter_map(|o| {
                o.get("id")
                    .and_then(Value::as_str)
                    .map(|id| (id.to_string(), o.clone()))
            })
            .collect()
    }
}

/// A downloaded image record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalImage {
    pub filename: String,
    #[serde(default)]
    pub width: u64,
    #[serde(default)]
    pub height: u64,
    #[serde(rename = "createdAt", default)]
    pub created_at: String,
    #[serde(default)]
    pub tags: Vec<Value>,
}

/// A downloaded observation image record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationImage {
    pub filename: String,
    #[serde(default)]
    pub width: u64,
    #[serde(default)]
    pub height: u64,
    pub id: String,
}

/// One feed item after download: original fields plus local image records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedItem {
    #[serde(default)]
    pub feed_item_id: String,
    #[serde(default)]
    pub sender: Value,
    #[serde(default)]
    pub receivers: Vec<Value>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub rich_text_body: String,
    #[serde(default)]
    pub created_date: String,
    #[serde(default)]
    pub images: Vec<LocalImage>,
    #[serde(default)]
    pub likes: Vec<Value>,
    #[serde(default)]
    pub comments: Vec<Value>,
    #[serde(default)]
    pub embed: Option<Value>,
    #[serde(rename = "observation_images", default)]
    pub observation_images: Vec<ObservationImage>,
}

impl ProcessedItem {
    /// True when the item embeds an observation rather than a plain post.
    pub fn is_observation(&self) -> bool {
        self.embed
            .as_ref()
            .and_then(|e| e.get("type"))
            .and_then(Value::as_str)
            == Some("Observation")
    }

    /// Observation id from the embed, if any.
    pub fn observation_id(&self) -> Option<&str> {
        self.embed
            .as_ref()?
            .get("observationId")
            .and_then(Value::as_str)
    }
}

/// `metadata.json`: everything the renderer needs.
#[derive(Debug, Serialize, Deserialize)]
pub struct ArchiveMetadata {
    pub processed_items: Vec<ProcessedItem>,
    #[serde(default)]
    pub observations: HashMap<String, Value>,
    #[serde(default)]
    pub export_date: Option<String>,
    pub total_items: usize,
}
