//! Image fetcher: downloads every image referenced by an exported feed and
//! writes `metadata.json` for the renderer.
//!
//! Failures are per-image: a fetch that still fails after retries is logged
//! and skipped, the item keeps its remaining images, and the batch continues.

mod metadata;
mod observation;

pub use metadata::{ArchiveMetadata, FeedExport, LocalImage, ObservationImage, ProcessedItem};
pub use observation::observation_image_url;

use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::feed::FeedItem;
use crate::fetch::{fetch_bytes, FetchOptions};
use crate::naming::{archive_dir_name, image_filename};
use crate::retry::{run_with_retry, FetchError, RetryPolicy};

/// How a download run is configured.
#[derive(Debug, Clone, Default)]
pub struct DownloadOptions {
    /// Archive directory override; derived from the export file name if unset.
    pub out_dir: Option<PathBuf>,
    pub fetch: FetchOptions,
    pub retry: RetryPolicy,
}

/// Outcome summary of a download run.
#[derive(Debug)]
pub struct DownloadReport {
    pub archive_dir: PathBuf,
    pub metadata_path: PathBuf,
    pub items: usize,
    pub photos: usize,
    pub failed: usize,
}

/// Fetch seam: URL in, image bytes out. Production uses curl with retry;
/// tests substitute a closure.
type Fetcher<'a> = dyn Fn(&str) -> Result<Vec<u8>, FetchError> + 'a;

/// Downloads all images for an exported feed file and writes `metadata.json`.
pub fn run_download(export_path: &Path, options: &DownloadOptions) -> Result<DownloadReport> {
    let bytes = fs::read(export_path)
        .with_context(|| format!("read feed export: {}", export_path.display()))?;
    let export: FeedExport = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse feed export JSON: {}", export_path.display()))?;

    let archive_dir = options
        .out_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(archive_dir_name(export_path)));
    let images_dir = archive_dir.join("images");
    fs::create_dir_all(&images_dir)
        .with_context(|| format!("create images dir: {}", images_dir.display()))?;

    let fetch_opts = options.fetch;
    let policy = options.retry;
    let fetcher = move |url: &str| -> Result<Vec<u8>, FetchError> {
        run_with_retry(&policy, || {
            let resp = fetch_bytes(url, &HashMap::new(), fetch_opts)?;
            if !resp.is_success() {
                return Err(FetchError::Http(resp.status));
            }
            Ok(resp.body)
        })
    };

    let (processed, photos, failed) = download_feed(&export, &images_dir, &fetcher);

    let metadata = ArchiveMetadata {
        observations: export.observation_map(),
        export_date: export.export_date.clone(),
        total_items: processed.len(),
        processed_items: processed,
    };
    let metadata_path = archive_dir.join("metadata.json");
    fs::write(&metadata_path, serde_json::to_string_pretty(&metadata)?)
        .with_context(|| format!("write metadata: {}", metadata_path.display()))?;

    tracing::info!(
        "downloaded {} photos ({} failed) from {} items into {}",
        photos,
        failed,
        metadata.total_items,
        archive_dir.display()
    );

    Ok(DownloadReport {
        archive_dir,
        metadata_path,
        items: metadata.total_items,
        photos,
        failed,
    })
}

/// Processes every item newest-first, fetching images through `fetch`.
/// Returns the processed items plus photo/failure counts.
fn download_feed(
    export: &FeedExport,
    images_dir: &Path,
    fetch: &Fetcher<'_>,
) -> (Vec<ProcessedItem>, usize, usize) {
    let observations = export.observation_map();

    let mut items: Vec<FeedItem> = export.feed_items.clone();
    items.sort_by(|a, b| b.created_date().cmp(a.created_date()));

    let total = items.len();
    let mut processed = Vec::with_capacity(total);
    let mut photos = 0usize;
    let mut failed = 0usize;

    for (index, item) in items.iter().enumerate() {
        let done = index + 1;
        tracing::debug!(
            "processing feed item {} [{}/{}]",
            item.id().as_deref().unwrap_or("unknown"),
            done,
            total
        );

        let out = process_item(item, &observations, images_dir, fetch);
        photos += out.item.images.len() + out.item.observation_images.len();
        failed += out.failed;
        processed.push(out.item);

        if done % 10 == 0 || done == total {
            tracing::info!("progress: {}/{} items processed", done, total);
        }
    }

    (processed, photos, failed)
}

struct ItemOutcome {
    item: ProcessedItem,
    failed: usize,
}

fn process_item(
    item: &FeedItem,
    observations: &HashMap<String, Value>,
    images_dir: &Path,
    fetch: &Fetcher<'_>,
) -> ItemOutcome {
    let v = &item.0;
    let mut failed = 0usize;

    let mut images = Vec::new();
    for image in v.get("images").and_then(Value::as_array).into_iter().flatten() {
        // Prefer the full-resolution variant.
        let url = image
            .get("url_big")
            .and_then(Value::as_str)
            .or_else(|| image.get("url").and_then(Value::as_str));
        let (Some(url), Some(id)) = (url, scalar_string(image.get("imageId"))) else {
            continue;
        };
        match save_image(&id, url, images_dir, fetch) {
            Some(filename) => images.push(LocalImage {
                filename,
                width: image.get("width").and_then(Value::as_u64).unwrap_or(0),
                height: image.get("height").and_then(Value::as_u64).unwrap_or(0),
                created_at: image
                    .get("createdAt")
                    .and_then(|c| c.get("date"))
                    .and_then(Value::as_str)
                    .unwrap_or("")
                    .to_string(),
                tags: image
                    .get("tags")
                    .and_then(Value::as_array)
                    .cloned()
                    .unwrap_or_default(),
            }),
            None => failed += 1,
        }
    }

    let embed = v.get("embed").filter(|e| !e.is_null()).cloned();
    let mut observation_images = Vec::new();
    if let Some(obs) = embed
        .as_ref()
        .filter(|e| e.get("type").and_then(Value::as_str) == Some("Observation"))
        .and_then(|e| e.get("observationId"))
        .and_then(Value::as_str)
        .and_then(|id| observations.get(id))
    {
        for obs_image in obs.get("images").and_then(Value::as_array).into_iter().flatten() {
            let (Some(url), Some(id)) = (
                observation_image_url(obs_image),
                scalar_string(obs_image.get("id")),
            ) else {
                continue;
            };
            match save_image(&id, &url, images_dir, fetch) {
                Some(filename) => observation_images.push(ObservationImage {
                    filename,
                    width: obs_image.get("width").and_then(Value::as_u64).unwrap_or(0),
                    height: obs_image.get("height").and_then(Value::as_u64).unwrap_or(0),
                    id,
                }),
                None => failed += 1,
            }
        }
    }

    let item = ProcessedItem {
        feed_item_id: item.id().unwrap_or_default(),
        sender: v.get("sender").cloned().unwrap_or(Value::Object(Default::default())),
        receivers: v
            .get("receivers")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default(),
        body: v.get("body").and_then(Value::as_str).unwrap_or("").to_string(),
        rich_text_body: v
            .get("richTextBody")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string(),
        created_date: item.created_date().to_string(),
        images,
        likes: v.get("likes").and_then(Value::as_array).cloned().unwrap_or_default(),
        comments: v
            .get("comments")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default(),
        embed,
        observation_images,
    };

    ItemOutcome { item, failed }
}

/// Fetches one image and writes it under `images_dir`. Returns the local
/// filename, or `None` after logging the failure.
fn save_image(image_id: &str, url: &str, images_dir: &Path, fetch: &Fetcher<'_>) -> Option<String> {
    let filename = image_filename(image_id, url);
    let body = match fetch(url) {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!("error downloading {}: {}", url, e);
            return None;
        }
    };
    let dest = images_dir.join(&filename);
    if let Err(e) = fs::write(&dest, body) {
        tracing::warn!("error writing {}: {}", dest.display(), e);
        return None;
    }
    tracing::debug!("downloaded {}", filename);
    Some(filename)
}

/// String form of a scalar id field (string or number).
fn scalar_string(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn export_with(items: Vec<Value>, observations: Vec<Value>) -> FeedExport {
        serde_json::from_value(json!({
            "feedItems": items,
            "observations": observations,
            "exportDate": "2025-08-29T10:00:00+00:00"
        }))
        .unwrap()
    }

    #[test]
    fn downloads_images_and_builds_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let export = export_with(
            vec![json!({
                "feedItemId": "a",
                "sender": {"name": "Alice"},
                "createdDate": "2025-08-01T00:00:00+00:00",
                "images": [
                    {"imageId": "img-1", "url": "https://cdn/x/small.jpg",
                     "url_big": "https://cdn/x/big.jpg", "width": 10, "height": 20,
                     "createdAt": {"date": "2025-08-01"}, "tags": []}
                ]
            })],
            vec![],
        );

        let fetched = std::cell::RefCell::new(Vec::new());
        let (processed, photos, failed) = download_feed(&export, dir.path(), &|url| {
            fetched.borrow_mut().push(url.to_string());
            Ok(b"bytes".to_vec())
        });

        // url_big preferred over url.
        assert_eq!(*fetched.borrow(), vec!["https://cdn/x/big.jpg"]);
        assert_eq!(photos, 1);
        assert_eq!(failed, 0);
        assert_eq!(processed[0].images[0].filename, "img-1.jpg");
        assert_eq!(processed[0].images[0].width, 10);
        assert!(dir.path().join("img-1.jpg").exists());
    }

    #[test]
    fn failed_fetch_skips_image_but_keeps_item() {
        let dir = tempfile::tempdir().unwrap();
        let export = export_with(
            vec![json!({
                "feedItemId": "a",
                "body": "hello",
                "images": [
                    {"imageId": "bad", "url": "https://cdn/bad.jpg"},
                    {"imageId": "good", "url": "https://cdn/good.jpg"}
                ]
            })],
            vec![],
        );

        let (processed, photos, failed) = download_feed(&export, dir.path(), &|url| {
            if url.contains("bad") {
                Err(FetchError::Http(404))
            } else {
                Ok(vec![1])
            }
        });

        assert_eq!(photos, 1);
        assert_eq!(failed, 1);
        assert_eq!(processed[0].images.len(), 1);
        assert_eq!(processed[0].body, "hello");
    }

    #[test]
    fn items_sorted_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let export = export_with(
            vec![
                json!({"feedItemId": "old", "createdDate": "2025-01-01T00:00:00+00:00"}),
                json!({"feedItemId": "new", "createdDate": "2025-08-01T00:00:00+00:00"}),
            ],
            vec![],
        );
        let (processed, _, _) = download_feed(&export, dir.path(), &|_| Ok(vec![]));
        assert_eq!(processed[0].feed_item_id, "new");
        assert_eq!(processed[1].feed_item_id, "old");
    }

    #[test]
    fn observation_embed_downloads_signed_images() {
        let dir = tempfile::tempdir().unwrap();
        let export = export_with(
            vec![json!({
                "feedItemId": "a",
                "embed": {"type": "Observation", "observationId": "obs-1"}
            })],
            vec![json!({
                "id": "obs-1",
                "images": [{
                    "id": "oi-1", "width": 100, "height": 200,
                    "secret": {"prefix": "https://img", "key": "k", "path": "p.png"}
                }]
            })],
        );

        let fetched = std::cell::RefCell::new(Vec::new());
        let (processed, photos, failed) = download_feed(&export, dir.path(), &|url| {
            fetched.borrow_mut().push(url.to_string());
            Ok(vec![0])
        });

        assert_eq!(*fetched.borrow(), vec!["https://img/k/100x200/p.png"]);
        assert_eq!((photos, failed), (1, 0));
        assert_eq!(processed[0].observation_images[0].filename, "oi-1.png");
        assert!(processed[0].is_observation());
    }

    #[test]
    fn run_download_writes_metadata_file() {
        let dir = tempfile::tempdir().unwrap();
        let export_path = dir.path().join("famly_feed_2025-08-29_20h25m.json");
        fs::write(
            &export_path,
            serde_json::to_string(&json!({
                "exportDate": "2025-08-29T10:00:00+00:00",
                "totalItems": 1,
                "feedItems": [{"feedItemId": "a", "body": "no images"}]
            }))
            .unwrap(),
        )
        .unwrap();

        let options = DownloadOptions {
            out_dir: Some(dir.path().join("archive")),
            ..Default::default()
        };
        let report = run_download(&export_path, &options).unwrap();
        assert_eq!(report.items, 1);
        assert_eq!(report.photos, 0);

        let metadata: ArchiveMetadata =
            serde_json::from_slice(&fs::read(report.metadata_path).unwrap()).unwrap();
        assert_eq!(metadata.total_items, 1);
        assert_eq!(metadata.export_date.as_deref(), Some("2025-08-29T10:00:00+00:00"));
        assert_eq!(metadata.processed_items[0].feed_item_id, "a");
    }
}
