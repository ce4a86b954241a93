// API handler functions module

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use std::sync::Arc;

use super::response::{bad_request, json_response};
use super::types::{DownloadCount, DownloadTable, SearchParams};
use crate::config::AppState;
use crate::translator::{AssetKind, SearchResult};

/// Kind-specific search endpoint
pub async fn handle_search(
    state: &Arc<AppState>,
    kind: AssetKind,
    query: Option<&str>,
) -> Response<Full<Bytes>> {
    let params = SearchParams::from_query(query);
    run_search(state, kind, &params).await
}

/// Generic search endpoint; `asset` picks the kind, icons when absent
pub async fn handle_generic_search(
    state: &Arc<AppState>,
    query: Option<&str>,
) -> Response<Full<Bytes>> {
    let params = SearchParams::from_query(query);
    let kind = match params.asset.as_deref() {
        None => AssetKind::Icon,
        Some(raw) => match raw.parse::<AssetKind>() {
            Ok(kind) => kind,
            Err(e) => {
                let result = SearchResult::rejected(400, "Bad Request", e.to_string());
                return search_response(state, &result);
            }
        },
    };
    run_search(state, kind, &params).await
}

async fn run_search(
    state: &Arc<AppState>,
    kind: AssetKind,
    params: &SearchParams,
) -> Response<Full<Bytes>> {
    let result = state
        .translator
        .search(kind, &params.term, params.page, params.per_page)
        .await;
    search_response(state, &result)
}

fn search_response(state: &Arc<AppState>, result: &SearchResult) -> Response<Full<Bytes>> {
    let status = StatusCode::from_u16(result.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    json_response(status, result, state.config.http.enable_cors)
}

/// GET /api/downloads/:id
pub fn handle_download_get(state: &Arc<AppState>, asset_id: &str) -> Response<Full<Bytes>> {
    let enable_cors = state.config.http.enable_cors;
    if asset_id.is_empty() {
        return bad_request("Asset id is required", enable_cors);
    }
    let body = DownloadCount {
        success: true,
        downloads: state.downloads.get(asset_id),
    };
    json_response(StatusCode::OK, &body, enable_cors)
}

/// POST /api/downloads/:id
pub async fn handle_download_increment(
    state: &Arc<AppState>,
    asset_id: &str,
) -> Response<Full<Bytes>> {
    let enable_cors = state.config.http.enable_cors;
    if asset_id.is_empty() {
        return bad_request("Asset id is required", enable_cors);
    }
    let body = DownloadCount {
        success: true,
        downloads: state.downloads.increment(asset_id).await,
    };
    json_response(StatusCode::OK, &body, enable_cors)
}

/// GET /api/downloads
pub fn handle_download_table(state: &Arc<AppState>) -> Response<Full<Bytes>> {
    let body = DownloadTable {
        success: true,
        downloads: state.downloads.snapshot(),
    };
    json_response(StatusCode::OK, &body, state.config.http.enable_cors)
}
