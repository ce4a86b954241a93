//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for method validation,
//! body size checks, and dispatching to the API or the front-end bundle.

use crate::api;
use crate::config::AppState;
use crate::handler::static_files;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::http::request::Parts;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Instant;

/// Request context for static file serving
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<String>,
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let (parts, _body) = req.into_parts();

    let response = route_request(&parts, &state).await;

    if state.cached_access_log.load(Ordering::Relaxed) {
        let mut entry = AccessLogEntry::from_parts(remote_addr.ip().to_string(), &parts);
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

async fn route_request(parts: &Parts, state: &Arc<AppState>) -> Response<Full<Bytes>> {
    let enable_cors = state.config.http.enable_cors;

    // 1. Preflight
    if parts.method == Method::OPTIONS {
        return http::build_options_response(enable_cors);
    }

    // 2. Check body size
    if let Some(resp) = check_body_size(parts, state.config.http.max_body_size) {
        return resp;
    }

    // 3. API routes answer their own method errors in JSON
    let path = parts.uri.path();
    if path.starts_with(api::API_PREFIX) {
        return api::handle_api(parts, state).await;
    }

    // 4. Front-end bundle
    if let Some(resp) = check_http_method(&parts.method) {
        return resp;
    }

    let ctx = RequestContext {
        path,
        is_head: parts.method == Method::HEAD,
        if_none_match: parts
            .headers
            .get("if-none-match")
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string),
    };
    static_files::serve(&ctx, &state.config.static_files).await
}

/// Static content is read-only
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(parts: &Parts, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = parts.headers.get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(method: Method, uri: &str, content_length: Option<&str>) -> Parts {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(len) = content_length {
            builder = builder.header("content-length", len);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_body_size_limit() {
        let too_big = parts(Method::POST, "/api/downloads/a", Some("2048"));
        let resp = check_body_size(&too_big, 1024).unwrap();
        assert_eq!(resp.status(), 413);

        let fine = parts(Method::POST, "/api/downloads/a", Some("12"));
        assert!(check_body_size(&fine, 1024).is_none());
        let garbage = parts(Method::POST, "/api/downloads/a", Some("lots"));
        assert!(check_body_size(&garbage, 1024).is_none());
    }

    #[test]
    fn test_static_methods() {
        assert!(check_http_method(&Method::GET).is_none());
        assert!(check_http_method(&Method::HEAD).is_none());
        assert_eq!(check_http_method(&Method::PUT).unwrap().status(), 405);
    }
}
