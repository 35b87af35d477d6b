//! Opaque feed item with a stable identity field.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One unit of feed content (post, photo, comment). Opaque to the capture
/// and export layers apart from `feedItemId`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedItem(pub Value);

impl FeedItem {
    /// Dedup key derived from `feedItemId`.
    ///
    /// String ids are used as-is; other JSON scalars (the platform has used
    /// numeric ids in older payloads) are rendered compactly so they still
    /// compare stably. `None` if the field is absent or null.
    pub fn id(&self) -> Option<String> {
        match self.0.get("feedItemId")? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// `createdDate` as a raw string, empty if absent (used for sorting).
    pub fn created_date(&self) -> &str {
        self.0
            .get("createdDate")
            .and_then(Value::as_str)
            .unwrap_or("")
    }
}

impl From<Value> for FeedItem {
    fn from(v: Value) -> Self {
        FeedItem(v)
    }
}
