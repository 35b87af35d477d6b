//! Signed CDN URL construction for observation images.
//!
//! Observation images come from the platform's GraphQL layer as a `secret`
//! record instead of a ready URL: `{prefix}/{key}/{W}x{H}/{path}` plus a
//! percent-encoded `expires` query parameter.

use serde_json::Value;

/// Dimensions the platform serves when the record carries none.
const DEFAULT_WIDTH: u64 = 520;
const DEFAULT_HEIGHT: u64 = 1040;

/// Builds the download URL for one observation image record, or `None` if
/// the `secret` fields are missing.
pub fn observation_image_url(image: &Value) -> Option<String> {
    let secret = image.get("secret")?;
    let prefix = secret.get("prefix").and_then(Value::as_str)?;
    let key = secret.get("key").and_then(Value::as_str)?;
    let path = secret.get("path").and_then(Value::as_str)?;
    let width = image.get("width").and_then(Value::as_u64).unwrap_or(DEFAULT_WIDTH);
    let height = image
        .get("height")
        .and_then(Value::as_u64)
        .unwrap_or(DEFAULT_HEIGHT);

    let mut url = format!("{}/{}/{}x{}/{}", prefix, key, width, height, path);
    if let Some(expires) = secret.get("expires").and_then(Value::as_str) {
        // The expiry is a timestamp; ':' and '+' must survive as query data.
        let encoded = expires.replace(':', "%3A").replace('+', "%2B");
        url.push_str("?expires=");
        url.push_str(&encoded);
    }
    Some(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builds_signed_url() {
        let image = json!({
            "id": "obs-img-1",
            "width": 800,
            "height": 600,
            "secret": {
                "prefix": "https://img.example.com",
                "key": "k123",
                "path": "photos/a.jpg",
                "expires": "2025-08-29T20:00:00+02:00"
            }
        });
        assert_eq!(
            observation_image_url(&image).unwrap(),
            "https://img.example.com/k123/800x600/photos/a.jpg?expires=2025-08-29T20%3A00%3A00%2B02%3A00"
        );
    }

    #[test]
    fn default_dimensions_and_no_expiry() {
        let image = json!({
            "secret": {"prefix": "https://img.example.com", "key": "k", "path": "p.png"}
        });
        assert_eq!(
            observation_image_url(&image).unwrap(),
            "https://img.example.com/k/520x1040/p.png"
        );
    }

    #[test]
    fn missing_secret_yields_none() {
        assert!(observation_image_url(&json!({"id": "x"})).is_none());
    }
}
