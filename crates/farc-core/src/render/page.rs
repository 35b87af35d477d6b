//! HTML assembly for the archive pages.

use serde_json::Value;
use std::collections::HashMap;

use crate::downloader::{ArchiveMetadata, ProcessedItem};

use super::escape::escape_html;
use super::format_display_date;

/// Shared stylesheet for both pages.
const STYLE: &str = r#"        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            max-width: 800px;
            margin: 0 auto;
            padding: 20px;
            background-color: #f5f5f5;
        }
        .feed-item {
            background: white;
            border-radius: 12px;
            margin-bottom: 24px;
            padding: 20px;
            box-shadow: 0 2px 8px rgba(0,0,0,0.1);
        }
        .sender {
            display: flex;
            align-items: center;
            margin-bottom: 12px;
        }
        .sender-image {
            width: 40px;
            height: 40px;
            border-radius: 50%;
            margin-right: 12px;
            background-color: #ddd;
        }
        .sender-info {
            flex: 1;
        }
        .sender-name {
            font-weight: 600;
            color: #333;
        }
        .post-date {
            color: #666;
            font-size: 14px;
        }
        .receivers {
            color: #666;
            font-size: 14px;
            margin-bottom: 12px;
        }
        .post-body {
            margin-bottom: 16px;
            line-height: 1.5;
        }
        .images-grid {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
            gap: 12px;
            margin-bottom: 16px;
        }
        .image-container {
            position: relative;
        }
        .image-container img {
            width: 100%;
            height: auto;
            border-radius: 8px;
            cursor: pointer;
        }
        .likes {
            display: flex;
            align-items: center;
            gap: 8px;
            color: #666;
            font-size: 14px;
        }
        .like {
            display: flex;
            align-items: center;
            gap: 4px;
        }
        .archive-header {
            text-align: center;
            margin-bottom: 40px;
            padding: 20px;
            background: white;
            border-radius: 12px;
        }
        .stats {
            display: flex;
            justify-content: center;
            gap: 40px;
            margin-top: 16px;
        }
        .stat {
            text-align: center;
        }
        .stat-number {
            font-size: 24px;
            font-weight: 600;
            color: #333;
        }
        .stat-label {
            color: #666;
            font-size: 14px;
        }
        .observation {
            background: #f8f9fa;
            border-left: 4px solid #007bff;
            padding: 16px;
            margin: 16px 0;
            border-radius: 4px;
        }
        .observation h4 {
            margin: 0 0 12px 0;
            color: #007bff;
        }
        .observation-text {
            margin: 12px 0;
            line-height: 1.5;
        }
        .development-areas {
            margin: 12px 0;
        }
        .area-tag {
            display: inline-block;
            background: #e9ecef;
            padding: 4px 8px;
            margin: 2px 4px 2px 0;
            border-radius: 12px;
            font-size: 12px;
            color: #495057;
        }
        .navigation {
            text-align: center;
            margin-bottom: 20px;
        }
        .nav-link {
            display: inline-block;
            padding: 8px 16px;
            margin: 0 8px;
            background: #007bff;
            color: white;
            text-decoration: none;
            border-radius: 6px;
        }
        .nav-link:hover {
            background: #0056b3;
        }
        .nav-link.current {
            background: #28a745;
        }
"#;

/// Renders one archive page. `posts_only` filters out observation embeds and
/// counts only regular photos.
pub fn render_page(metadata: &ArchiveMetadata, posts_only: bool) -> String {
    let items: Vec<&ProcessedItem> = metadata
        .processed_items
        .iter()
        .filter(|i| !posts_only || !i.is_observation())
        .collect();

    let photos: usize = items
        .iter()
        .map(|i| {
            if posts_only {
                i.images.len()
            } else {
                i.images.len() + i.observation_images.len()
            }
        })
        .sum();

    let title = if posts_only {
        "Famly Feed Archive - Posts Only"
    } else {
        "Famly Feed Archive"
    };
    let item_label = if posts_only { "Posts" } else { "Total Items" };
    let export_line = metadata
        .export_date
        .as_deref()
        .map(format_display_date)
        .unwrap_or_else(|| chrono::Local::now().format("%B %d, %Y").to_string());

    let mut page = String::new();
    page.push_str(&format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{STYLE}    </style>
</head>
<body>
    <div class="navigation">
        <a href="index.html" class="nav-link{all_current}">All Posts &amp; Observations</a>
        <a href="posts-only.html" class="nav-link{posts_current}">Posts Only</a>
    </div>

    <div class="archive-header">
        <h1>{title}</h1>
        <p>Exported on {export_line}</p>
        <div class="stats">
            <div class="stat">
                <div class="stat-number">{items}</div>
                <div class="stat-label">{item_label}</div>
            </div>
            <div class="stat">
                <div class="stat-number">{photos}</div>
                <div class="stat-label">Photos</div>
            </div>
        </div>
    </div>
"#,
        all_current = if posts_only { "" } else { " current" },
        posts_current = if posts_only { " current" } else { "" },
        items = items.len(),
    ));

    for item in &items {
        page.push_str(&render_item(item, &metadata.observations, posts_only));
    }

    page.push_str("\n</body>\n</html>");
    page
}

fn render_item(
    item: &ProcessedItem,
    observations: &HashMap<String, Value>,
    posts_only: bool,
) -> String {
    let sender_name = escape_html(
        item.sender
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("Unknown"),
    );
    let post_date = format_display_date(&item.created_date);

    let mut out = format!(
        r#"
    <div class="feed-item">
        <div class="sender">
            <div class="sender-image"></div>
            <div class="sender-info">
                <div class="sender-name">{sender_name}</div>
                <div class="post-date">{post_date}</div>
            </div>
        </div>
"#
    );

    let receivers: Vec<&str> = item.receivers.iter().filter_map(Value::as_str).collect();
    if !receivers.is_empty() {
        out.push_str(&format!(
            "        <div class=\"receivers\">To: {}</div>\n",
            escape_html(&receivers.join(", "))
        ));
    }

    let body = post_body(item);
    if !body.is_empty() {
        out.push_str(&format!("        <div class=\"post-body\">{}</div>\n", body));
    }

    if !item.images.is_empty() {
        out.push_str("        <div class=\"images-grid\">\n");
        for image in &item.images {
            out.push_str(&format!(
                "            <div class=\"image-container\">\n                <img src=\"images/{}\" alt=\"Photo\" loading=\"lazy\">\n            </div>\n",
                image.filename
            ));
        }
        out.push_str("        </div>\n");
    }

    if !posts_only {
        if let Some(obs) = item.observation_id().and_then(|id| observations.get(id)) {
            out.push_str(&render_observation(item, obs));
        }
    }

    if !item.likes.is_empty() {
        out.push_str("        <div class=\"likes\">\n");
        for like in &item.likes {
            let reaction = like.get("reaction").and_then(Value::as_str).unwrap_or("❤️");
            let name = escape_html(like.get("name").and_then(Value::as_str).unwrap_or("Someone"));
            out.push_str(&format!("            <div class=\"like\">{} {}</div>\n", reaction, name));
        }
        out.push_str("        </div>\n");
    }

    out.push_str("    </div>\n");
    out
}

/// Item body: prefer the rich text variant; plain text gets escaped with
/// newlines turned into breaks. Rich text (already markup) is inserted as-is.
fn post_body(item: &ProcessedItem) -> String {
    let raw = if item.rich_text_body.is_empty() {
        item.body.as_str()
    } else {
        item.rich_text_body.as_str()
    };
    if raw.is_empty() {
        return String::new();
    }
    if raw.starts_with('<') {
        raw.to_string()
    } else {
        escape_html(raw).replace('\n', "<br>")
    }
}

fn render_observation(item: &ProcessedItem, obs: &Value) -> String {
    let mut out = String::from("        <div class=\"observation\">\n");
    out.push_str("            <h4>📝 Observation</h4>\n");

    if let Some(author) = obs
        .get("createdBy")
        .and_then(|c| c.get("name"))
        .and_then(|n| n.get("fullName"))
        .and_then(Value::as_str)
    {
        out.push_str(&format!(
            "            <p><strong>Observer:</strong> {}</p>\n",
            escape_html(author)
        ));
    }

    if let Some(remark) = obs.get("remark") {
        let remark_body = remark
            .get("richTextBody")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .or_else(|| remark.get("body").and_then(Value::as_str))
            .unwrap_or("");
        if !remark_body.is_empty() {
            out.push_str(&format!(
                "            <div class=\"observation-text\">{}</div>\n",
                remark_body
            ));
        }

        if let Some(areas) = remark.get("areas").and_then(Value::as_array) {
            if !areas.is_empty() {
                out.push_str("            <div class=\"development-areas\">\n");
                out.push_str("                <strong>Development Areas:</strong>\n");
                for area in areas {
                    let title = area
                        .get("area")
                        .and_then(|a| a.get("title"))
                        .and_then(Value::as_str)
                        .unwrap_or("");
                    let refinement = area.get("refinement").and_then(Value::as_str).unwrap_or("");
                    out.push_str(&format!(
                        "                <span class=\"area-tag\">{} ({})</span>\n",
                        escape_html(title),
                        escape_html(refinement)
                    ));
                }
                out.push_str("            </div>\n");
            }
        }
    }

    if !item.observation_images.is_empty() {
        out.push_str("            <div class=\"images-grid\">\n");
        for image in &item.observation_images {
            out.push_str(&format!(
                "                <div class=\"image-container\">\n                    <img src=\"images/{}\" alt=\"Observation Photo\" loading=\"lazy\">\n                </div>\n",
                image.filename
            ));
        }
        out.push_str("            </div>\n");
    }

    out.push_str("        </div>\n");
    out
}
