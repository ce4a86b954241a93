// API request/response types

use serde::Serialize;

use crate::downloads::Counts;
use crate::translator::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, DEFAULT_TERM};

/// Query string of a search endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub term: String,
    pub page: u32,
    pub per_page: u32,
    /// Only read by the generic search route
    pub asset: Option<String>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            term: DEFAULT_TERM.to_string(),
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PAGE_SIZE,
            asset: None,
        }
    }
}

impl SearchParams {
    /// Parse `q`, `page`, `per_page` and `asset`; bad numbers fall back to defaults
    pub fn from_query(query: Option<&str>) -> Self {
        let mut params = Self::default();
        let Some(query) = query else {
            return params;
        };

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "q" | "query" | "term" => {
                    let term = value.trim();
                    if !term.is_empty() {
                        params.term = term.to_string();
                    }
                }
                "page" => {
                    params.page = parse_count(&value, DEFAULT_PAGE);
                }
                "per_page" | "limit" => {
                    params.per_page = parse_count(&value, DEFAULT_PAGE_SIZE);
                }
                "asset" | "type" => {
                    if !value.trim().is_empty() {
                        params.asset = Some(value.trim().to_string());
                    }
                }
                _ => {}
            }
        }
        params
    }
}

/// Unsigned count; overlong digit runs saturate, anything else is `default`
fn parse_count(value: &str, default: u32) -> u32 {
    let value = value.trim();
    match value.parse::<u32>() {
        Ok(n) => n,
        Err(_) if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) => u32::MAX,
        Err(_) => default,
    }
}

/// `{ success, downloads: n }`
#[derive(Debug, Serialize)]
pub struct DownloadCount {
    pub success: bool,
    pub downloads: u64,
}

/// `{ success, downloads: { id: n } }`
#[derive(Debug, Serialize)]
pub struct DownloadTable {
    pub success: bool,
    pub downloads: Counts,
}
