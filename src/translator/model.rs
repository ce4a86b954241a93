//! Request and response shapes shared by the translator and its adapters

use serde::Serialize;

use super::error::TranslatorError;
use super::kind::AssetKind;

pub const DEFAULT_TERM: &str = "popular";
pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Normalized search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub term: String,
    pub page: u32,
    pub page_size: u32,
    pub kind: AssetKind,
}

impl SearchQuery {
    /// Build a query, substituting defaults for blank or zero inputs
    pub fn new(kind: AssetKind, term: &str, page: u32, page_size: u32) -> Self {
        let term = term.trim();
        Self {
            term: if term.is_empty() {
                DEFAULT_TERM.to_string()
            } else {
                term.to_string()
            },
            page: page.max(1),
            page_size: page_size.max(1),
            kind,
        }
    }

    /// Same query with the page size capped at `max`
    #[must_use]
    pub fn clamped(mut self, max: u32) -> Self {
        self.page_size = self.page_size.clamp(1, max.max(1));
        self
    }
}

/// Endpoint and parameters for one upstream call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRequest {
    pub path: String,
    pub params: Vec<(String, String)>,
}

impl ProviderRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: Vec::new(),
        }
    }

    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    /// First value of a parameter
    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Thumbnail URLs in the sizes the front end renders
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ThumbnailUrls {
    pub small: Option<String>,
    pub medium: Option<String>,
    pub original: Option<String>,
}

#[cfg(test)]
impl ThumbnailUrls {
    pub const fn is_empty(&self) -> bool {
        self.small.is_none() && self.medium.is_none() && self.original.is_none()
    }
}

/// Provider-independent asset returned to the front end
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedAsset {
    pub id: String,
    pub display_name: String,
    pub thumbnail_urls: ThumbnailUrls,
    pub preview_url: Option<String>,
}

/// One decoded page of upstream results
#[derive(Debug, Clone, Default)]
pub struct ProviderPage {
    pub assets: Vec<NormalizedAsset>,
    pub pagination: serde_json::Value,
}

/// Envelope served by every search endpoint
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub success: bool,
    pub data: Vec<NormalizedAsset>,
    pub pagination: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// HTTP status the envelope is served with
    #[serde(skip)]
    pub status: u16,
}

impl SearchResult {
    pub fn success(page: ProviderPage, note: Option<&str>) -> Self {
        Self {
            success: true,
            data: page.assets,
            pagination: if page.pagination.is_null() {
                empty_object()
            } else {
                page.pagination
            },
            note: note.map(ToString::to_string),
            error: None,
            message: None,
            status: 200,
        }
    }

    pub fn failure(err: &TranslatorError) -> Self {
        Self {
            success: false,
            data: Vec::new(),
            pagination: empty_object(),
            note: None,
            error: Some(err.label().to_string()),
            message: Some(err.message()),
            status: err.status(),
        }
    }

    /// Failure for requests rejected before reaching the translator
    pub fn rejected(status: u16, error: &str, message: String) -> Self {
        Self {
            success: false,
            data: Vec::new(),
            pagination: empty_object(),
            note: None,
            error: Some(error.to_string()),
            message: Some(message),
            status,
        }
    }
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}
