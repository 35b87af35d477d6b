//! Local file and directory naming for archive artifacts.
//!
//! Image files are named `<imageId>.<ext>` with the extension taken from the
//! source URL path, sanitized for Linux filesystems. The archive directory
//! inherits the timestamp stamp of the export file it was built from.

mod sanitize;

pub use sanitize::sanitize_filename;

use std::path::Path;

/// Fallback extension when the URL path carries none.
const DEFAULT_EXT: &str = "jpg";

/// Extension from the last path segment of `url` (query excluded).
fn extension_from_url(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path().split('/').filter(|s| !s.is_empty()).last()?;
    let (_, ext) = segment.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Local filename for a downloaded image: `<imageId>.<ext>`.
pub fn image_filename(image_id: &str, url: &str) -> String {
    let ext = extension_from_url(url).unwrap_or_else(|| DEFAULT_EXT.to_string());
    sanitize_filename(&format!("{}.{}", image_id, ext))
}

/// Archive directory name derived from the export file name.
///
/// `famly_feed_<stamp>.json` maps to `famly_archive_<stamp>` so multiple
/// exports keep distinct archives; anything else gets the plain default.
pub fn archive_dir_name(export_path: &Path) -> String {
    let stem = export_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("");
    match stem.strip_prefix("famly_feed_") {
        Some(stamp) if !stamp.is_empty() => format!("famly_archive_{}", stamp),
        _ => "famly_archive".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_filename_ext_from_url() {
        assert_eq!(
            image_filename("img-1", "https://cdn.example.com/photos/p.jpeg?expires=x"),
            "img-1.jpeg"
        );
        assert_eq!(
            image_filename("img-2", "https://cdn.example.com/a/b/photo.PNG"),
            "img-2.png"
        );
    }

    #[test]
    fn image_filename_defaults_to_jpg() {
        assert_eq!(image_filename("img-3", "https://cdn.example.com/raw"), "img-3.jpg");
        assert_eq!(image_filename("img-4", "not a url"), "img-4.jpg");
    }

    #[test]
    fn image_filename_sanitizes_id() {
        assert_eq!(
            image_filename("a/b", "https://cdn.example.com/x.png"),
            "a_b.png"
        );
    }

    #[test]
    fn archive_dir_from_export_stamp() {
        assert_eq!(
            archive_dir_name(Path::new("/tmp/famly_feed_2025-08-29_20h25m.json")),
            "famly_archive_2025-08-29_20h25m"
        );
        assert_eq!(archive_dir_name(Path::new("feed.json")), "famly_archive");
        assert_eq!(archive_dir_name(Path::new("famly_feed_.json")), "famly_archive");
    }
}
