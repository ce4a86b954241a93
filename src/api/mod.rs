// API module entry
// JSON endpoints: asset searches and download counters

mod handlers;
mod response;
mod types;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::http::request::Parts;
use hyper::{Method, Response};
use percent_encoding::percent_decode_str;
use std::sync::Arc;

use crate::config::AppState;
use crate::translator::AssetKind;

/// Prefix shared by every API route
pub const API_PREFIX: &str = "/api/";

const DOWNLOADS_PATH: &str = "/api/downloads";

/// Kind-specific search routes
const SEARCH_ROUTES: &[(&str, AssetKind)] = &[
    ("/api/icons", AssetKind::Icon),
    ("/api/3d-icons", AssetKind::ThreeD),
    ("/api/illustrations", AssetKind::Illustration),
    ("/api/lottie", AssetKind::Animation),
];

/// API route handler
///
/// Dispatches to handler functions based on request path and method
pub async fn handle_api(parts: &Parts, state: &Arc<AppState>) -> Response<Full<Bytes>> {
    let path = parts.uri.path().trim_end_matches('/');
    let query = parts.uri.query();
    let method = &parts.method;
    let enable_cors = state.config.http.enable_cors;
    let readable = *method == Method::GET || *method == Method::HEAD;

    if let Some(&(_, kind)) = SEARCH_ROUTES.iter().find(|(route, _)| *route == path) {
        return if readable {
            handlers::handle_search(state, kind, query).await
        } else {
            response::method_not_allowed(method.as_str(), enable_cors)
        };
    }

    match path {
        "/api/search" if readable => handlers::handle_generic_search(state, query).await,
        DOWNLOADS_PATH if readable => handlers::handle_download_table(state),
        "/api/search" | DOWNLOADS_PATH => response::method_not_allowed(method.as_str(), enable_cors),
        _ => match download_id(path) {
            Some(id) if readable => handlers::handle_download_get(state, &id),
            Some(id) if *method == Method::POST => {
                handlers::handle_download_increment(state, &id).await
            }
            Some(_) => response::method_not_allowed(method.as_str(), enable_cors),
            None => response::not_found(parts.uri.path(), enable_cors),
        },
    }
}

/// Decoded `:assetId` of `/api/downloads/:assetId`
fn download_id(path: &str) -> Option<String> {
    let raw = path.strip_prefix(DOWNLOADS_PATH)?.strip_prefix('/')?;
    if raw.contains('/') {
        return None;
    }
    let id = percent_decode_str(raw).decode_utf8().ok()?;
    Some(id.trim().to_string())
}
