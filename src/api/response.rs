// API response utility functions module

use crate::http::cache::CachePolicy;
use crate::http::with_cors;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

/// Build JSON response
pub fn json_response<T: Serialize>(
    status: StatusCode,
    body: &T,
    enable_cors: bool,
) -> Response<Full<Bytes>> {
    let (status, json) = match serde_json::to_vec(body) {
        Ok(j) => (status, Bytes::from(j)),
        Err(e) => {
            logger::log_error(&format!("Failed to serialize response: {e}"));
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Bytes::from_static(br#"{"success":false,"error":"Internal server error"}"#),
            )
        }
    };

    with_cors(Response::builder(), enable_cors)
        .status(status)
        .header("Content-Type", "application/json")
        .header("Cache-Control", CachePolicy::NoStore.to_header_value())
        .body(Full::new(json))
        .unwrap_or_else(|e| {
            logger::log_error(&format!("Failed to build response: {e}"));
            Response::new(Full::new(Bytes::from("Error")))
        })
}

/// JSON error body in the search envelope's shape
pub fn error_response(status: StatusCode, error: &str, message: &str, enable_cors: bool) -> Response<Full<Bytes>> {
    let body = serde_json::json!({
        "success": false,
        "error": error,
        "message": message,
    });
    json_response(status, &body, enable_cors)
}

/// 404 Not Found response
pub fn not_found(path: &str, enable_cors: bool) -> Response<Full<Bytes>> {
    error_response(
        StatusCode::NOT_FOUND,
        "Not Found",
        &format!("No API route for {path}"),
        enable_cors,
    )
}

/// 405 Method Not Allowed response
pub fn method_not_allowed(method: &str, enable_cors: bool) -> Response<Full<Bytes>> {
    let mut resp = error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        "Method Not Allowed",
        &format!("{method} is not supported on this route"),
        enable_cors,
    );
    resp.headers_mut().insert(
        hyper::header::ALLOW,
        hyper::header::HeaderValue::from_static(crate::http::response::ALLOWED_METHODS),
    );
    resp
}

/// 400 Bad Request response
pub fn bad_request(message: &str, enable_cors: bool) -> Response<Full<Bytes>> {
    error_response(StatusCode::BAD_REQUEST, "Bad Request", message, enable_cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_json_response_headers() {
        let resp = json_response(StatusCode::OK, &serde_json::json!({"success": true}), true);
        assert_eq!(resp.headers()["Content-Type"], "application/json");
        assert_eq!(resp.headers()["Access-Control-Allow-Origin"], "*");

        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], br#"{"success":true}"#);
    }

    #[test]
    fn test_method_not_allowed_sets_allow() {
        let resp = method_not_allowed("DELETE", false);
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert!(resp.headers().contains_key("allow"));
        assert!(resp.headers().get("Access-Control-Allow-Origin").is_none());
    }
}
