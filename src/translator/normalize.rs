//! Helpers that turn loosely-shaped provider items into [`NormalizedAsset`]s
//!
//! Providers omit sizes, names and sometimes whole sub-objects. Every helper
//! here degrades to the richest URL or name still available instead of failing
//! the row.

use super::model::{NormalizedAsset, ThumbnailUrls};

pub const SMALL_PX: u32 = 64;
pub const MEDIUM_PX: u32 = 128;
pub const UNTITLED: &str = "Untitled";

/// A thumbnail as reported upstream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Thumbnail {
    pub url: String,
    pub width: Option<u32>,
    /// Free-form size tag such as `"64"` or `"64px"`
    pub size: Option<String>,
}

impl Thumbnail {
    fn matches_px(&self, px: u32) -> bool {
        if self.width == Some(px) {
            return true;
        }
        self.size
            .as_deref()
            .map(|s| s.trim().trim_end_matches("px"))
            .and_then(|s| s.parse::<u32>().ok())
            == Some(px)
    }
}

/// Raw fields collected from one provider item
#[derive(Debug, Clone, Default)]
pub struct RawAsset<'a> {
    pub id: Option<String>,
    /// Name candidates, most preferred first
    pub names: Vec<Option<&'a str>>,
    pub thumbnails: Vec<Thumbnail>,
    /// Full-resolution image URL
    pub full_url: Option<&'a str>,
}

/// Render a JSON id (number or string) as a stable string key
pub fn id_string(value: Option<&serde_json::Value>) -> Option<String> {
    match value? {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First non-blank name, or `"Untitled"`
pub fn display_name(candidates: &[Option<&str>]) -> String {
    candidates
        .iter()
        .flatten()
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
        .unwrap_or(UNTITLED)
        .to_string()
}

fn non_blank(url: Option<&str>) -> Option<&str> {
    url.map(str::trim).filter(|u| !u.is_empty())
}

/// Thumbnail of the given pixel size, else the first one, else the full image
fn pick_thumbnail<'a>(
    thumbnails: &'a [Thumbnail],
    px: u32,
    full_url: Option<&'a str>,
) -> Option<&'a str> {
    thumbnails
        .iter()
        .find(|t| t.matches_px(px))
        .or_else(|| thumbnails.first())
        .map(|t| t.url.as_str())
        .or(full_url)
}

pub fn thumbnail_urls(thumbnails: &[Thumbnail], full_url: Option<&str>) -> ThumbnailUrls {
    let thumbnails: Vec<Thumbnail> = thumbnails
        .iter()
        .filter(|t| !t.url.trim().is_empty())
        .cloned()
        .collect();
    let full_url = non_blank(full_url);

    let largest = thumbnails
        .iter()
        .max_by_key(|t| t.width.unwrap_or(0))
        .map(|t| t.url.as_str());

    ThumbnailUrls {
        small: pick_thumbnail(&thumbnails, SMALL_PX, full_url).map(ToString::to_string),
        medium: pick_thumbnail(&thumbnails, MEDIUM_PX, full_url).map(ToString::to_string),
        original: full_url.or(largest).map(ToString::to_string),
    }
}

impl RawAsset<'_> {
    /// `None` when the item carries no usable id
    pub fn normalize(self) -> Option<NormalizedAsset> {
        let id = self.id?;
        let thumbnail_urls = thumbnail_urls(&self.thumbnails, self.full_url);
        // `original` already prefers the full image over the largest thumbnail
        let preview_url = thumbnail_urls
            .original
            .clone()
            .or_else(|| thumbnail_urls.medium.clone())
            .or_else(|| thumbnail_urls.small.clone());

        Some(NormalizedAsset {
            id,
            display_name: display_name(&self.names),
            thumbnail_urls,
            preview_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn thumb(url: &str, width: Option<u32>) -> Thumbnail {
        Thumbnail {
            url: url.to_string(),
            width,
            size: None,
        }
    }

    #[test]
    fn test_prefers_tagged_size() {
        let thumbs = vec![thumb("a-256", Some(256)), thumb("a-64", Some(64)), thumb("a-128", Some(128))];
        let urls = thumbnail_urls(&thumbs, None);
        assert_eq!(urls.small.as_deref(), Some("a-64"));
        assert_eq!(urls.medium.as_deref(), Some("a-128"));
        assert_eq!(urls.original.as_deref(), Some("a-256"));
    }

    #[test]
    fn test_size_tag_matches() {
        let thumbs = vec![
            thumb("first", None),
            Thumbnail {
                url: "tagged".to_string(),
                width: None,
                size: Some("64px".to_string()),
            },
        ];
        let urls = thumbnail_urls(&thumbs, None);
        assert_eq!(urls.small.as_deref(), Some("tagged"));
        assert_eq!(urls.medium.as_deref(), Some("first"));
    }

    #[test]
    fn test_falls_back_to_full_image() {
        let urls = thumbnail_urls(&[], Some("https://cdn/full.png"));
        assert_eq!(urls.small.as_deref(), Some("https://cdn/full.png"));
        assert_eq!(urls.medium.as_deref(), Some("https://cdn/full.png"));
        assert_eq!(urls.original.as_deref(), Some("https://cdn/full.png"));
    }

    #[test]
    fn test_nothing_available() {
        let urls = thumbnail_urls(&[thumb("  ", Some(64))], Some(""));
        assert!(urls.is_empty());
    }

    #[test]
    fn test_display_name_chain() {
        assert_eq!(display_name(&[None, Some(" "), Some("cat.svg")]), "cat.svg");
        assert_eq!(display_name(&[Some("Cat"), Some("cat.svg")]), "Cat");
        assert_eq!(display_name(&[None, None]), "Untitled");
    }

    #[test]
    fn test_id_string() {
        assert_eq!(id_string(Some(&json!(123))), Some("123".to_string()));
        assert_eq!(id_string(Some(&json!("abc"))), Some("abc".to_string()));
        assert_eq!(id_string(Some(&json!(""))), None);
        assert_eq!(id_string(Some(&json!(null))), None);
        assert_eq!(id_string(None), None);
    }

    #[test]
    fn test_preview_degrades_to_thumbnail() {
        let asset = RawAsset {
            id: Some("7".to_string()),
            names: vec![None],
            thumbnails: vec![thumb("t-128", Some(128))],
            full_url: None,
        }
        .normalize()
        .unwrap();
        assert_eq!(asset.preview_url.as_deref(), Some("t-128"));
        assert_eq!(asset.display_name, "Untitled");
    }

    #[test]
    fn test_preview_prefers_largest_thumbnail() {
        let asset = RawAsset {
            id: Some("8".to_string()),
            names: vec![Some("Rocket")],
            thumbnails: vec![
                thumb("t-64", Some(64)),
                thumb("t-256", Some(256)),
                thumb("t-128", Some(128)),
            ],
            full_url: Some("  "),
        }
        .normalize()
        .unwrap();
        assert_eq!(asset.preview_url.as_deref(), Some("t-256"));
        assert_eq!(asset.thumbnail_urls.medium.as_deref(), Some("t-128"));
    }

    #[test]
    fn test_missing_id_drops_row() {
        assert!(RawAsset::default().normalize().is_none());
    }
}
