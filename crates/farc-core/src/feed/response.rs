//! One intercepted feed API reply.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::FeedItem;

/// A single captured network reply. Immutable once created; the timestamp is
/// assigned at interception time, not taken from the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapturedResponse {
    /// Request URL.
    pub url: String,
    /// ISO-8601 capture time.
    pub timestamp: String,
    /// Parsed response body. Guaranteed to contain a non-empty `feedItems`
    /// array when constructed through [`CapturedResponse::from_payload`].
    pub payload: Value,
}

impl CapturedResponse {
    /// Builds a captured response if (and only if) `payload` carries a
    /// non-empty `feedItems` array. Anything else is a silent non-match.
    pub fn from_payload(url: &str, payload: Value) -> Option<Self> {
        let non_empty = payload
            .get("feedItems")
            .and_then(Value::as_array)
            .map(|a| !a.is_empty())
            .unwrap_or(false);
        if !non_empty {
            return None;
        }
        Some(Self {
            url: url.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            payload,
        })
    }

    /// Items carried by this response, in server order.
    pub fn feed_items(&self) -> impl Iterator<Item = FeedItem> + '_ {
        self.payload
            .get("feedItems")
            .and_then(Value::as_array)
            .map(|a| a.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(|v| FeedItem(v.clone()))
    }

    /// Number of items carried by this response (pre-dedup).
    pub fn item_count(&self) -> usize {
        self.payload
            .get("feedItems")
            .and_then(Value::as_array)
            .map(|a| a.len())
            .unwrap_or(0)
    }
}
