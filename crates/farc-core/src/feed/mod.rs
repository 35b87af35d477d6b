//! Feed data model: captured responses, feed items, export bundles.
//!
//! Feed items are opaque JSON objects; the only field this layer interprets
//! is `feedItemId`, the stable identity used for deduplication. Everything
//! else passes through export verbatim.

mod bundle;
mod item;
mod response;

pub use bundle::ExportBundle;
pub use item::FeedItem;
pub use response::CapturedResponse;
