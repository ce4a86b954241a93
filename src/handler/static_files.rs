//! Static file serving module
//!
//! Serves the front-end bundle: files under the static root, fixed pages,
//! and the index file for every other path so client-side routing works.

use crate::config::StaticConfig;
use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use percent_encoding::percent_decode_str;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Serve a front-end request
pub async fn serve(ctx: &RequestContext<'_>, config: &StaticConfig) -> Response<Full<Bytes>> {
    let root = Path::new(&config.root);

    let loaded = if let Some(page) = config.pages.get(ctx.path.trim_end_matches('/')) {
        load_from_root(root, page, &config.index_file).await
    } else {
        load_from_root(root, ctx.path, &config.index_file).await
    };

    match loaded {
        Some((content, content_type)) => build_file_response(ctx, content, content_type),
        None => serve_index(ctx, root, &config.index_file).await,
    }
}

/// SPA fallback
async fn serve_index(
    ctx: &RequestContext<'_>,
    root: &Path,
    index_file: &str,
) -> Response<Full<Bytes>> {
    match load_from_root(root, index_file, index_file).await {
        Some((content, content_type)) => build_file_response(ctx, content, content_type),
        None => {
            logger::log_warning(&format!(
                "Index file '{}' missing under '{}'",
                index_file,
                root.display()
            ));
            http::build_404_response()
        }
    }
}

/// Load a file below `root`, resolving directories to `index_file`
///
/// Returns `None` for missing files and for anything that resolves outside `root`.
pub async fn load_from_root(
    root: &Path,
    request_path: &str,
    index_file: &str,
) -> Option<(Vec<u8>, &'static str)> {
    let decoded = percent_decode_str(request_path).decode_utf8().ok()?;
    let relative = decoded.trim_start_matches('/');

    let root_canonical = match root.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Static directory not found or inaccessible '{}': {e}",
                root.display()
            ));
            return None;
        }
    };

    let mut file_path: PathBuf = root.join(relative);
    if relative.is_empty() || relative.ends_with('/') || file_path.is_dir() {
        file_path = file_path.join(index_file);
    }

    // File not found is common, no need to log
    let file_canonical = file_path.canonicalize().ok()?;
    if !file_canonical.starts_with(&root_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            request_path,
            file_canonical.display()
        ));
        return None;
    }
    if !file_canonical.is_file() {
        return None;
    }

    let content = match fs::read(&file_canonical).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {}",
                file_canonical.display(),
                e
            ));
            return None;
        }
    };

    let content_type = mime::get_content_type(file_canonical.extension().and_then(|e| e.to_str()));
    Some((content, content_type))
}

/// Build a 200 or 304 for loaded content
fn build_file_response(
    ctx: &RequestContext<'_>,
    content: Vec<u8>,
    content_type: &'static str,
) -> Response<Full<Bytes>> {
    let etag = cache::generate_etag(&content);

    if cache::check_etag_match(ctx.if_none_match.as_deref(), &etag) {
        return http::build_304_response(&etag);
    }

    http::build_static_response(
        Bytes::from(content),
        content_type,
        &etag,
        cache::CachePolicy::for_content_type(content_type),
        ctx.is_head,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use std::collections::HashMap;

    fn bundle() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("public/assets")).unwrap();
        std::fs::write(dir.path().join("public/index.html"), "<h1>app</h1>").unwrap();
        std::fs::write(dir.path().join("public/privacy.html"), "<h1>privacy</h1>").unwrap();
        std::fs::write(dir.path().join("public/assets/app.js"), "console.log(1)").unwrap();
        std::fs::write(dir.path().join("secret.txt"), "nope").unwrap();
        dir
    }

    fn config(dir: &tempfile::TempDir) -> StaticConfig {
        StaticConfig {
            root: dir.path().join("public").to_string_lossy().into_owned(),
            index_file: "index.html".to_string(),
            pages: HashMap::from([("/privacy".to_string(), "privacy.html".to_string())]),
        }
    }

    fn ctx(path: &str) -> RequestContext<'_> {
        RequestContext {
            path,
            is_head: false,
            if_none_match: None,
        }
    }

    async fn body_of(resp: Response<Full<Bytes>>) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_serves_asset_with_type() {
        let dir = bundle();
        let resp = serve(&ctx("/assets/app.js"), &config(&dir)).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "application/javascript");
        assert_eq!(body_of(resp).await, "console.log(1)");
    }

    #[tokio::test]
    async fn test_fixed_page() {
        let dir = bundle();
        let resp = serve(&ctx("/privacy"), &config(&dir)).await;
        assert_eq!(body_of(resp).await, "<h1>privacy</h1>");
    }

    #[tokio::test]
    async fn test_unknown_path_falls_back_to_index() {
        let dir = bundle();
        let resp = serve(&ctx("/collections/42"), &config(&dir)).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Cache-Control"], "no-cache");
        assert_eq!(body_of(resp).await, "<h1>app</h1>");
    }

    #[tokio::test]
    async fn test_traversal_blocked() {
        let dir = bundle();
        let root = dir.path().join("public");
        assert!(load_from_root(&root, "/../secret.txt", "index.html").await.is_none());
        assert!(load_from_root(&root, "/%2e%2e/secret.txt", "index.html").await.is_none());

        let resp = serve(&ctx("/../secret.txt"), &config(&dir)).await;
        assert_eq!(body_of(resp).await, "<h1>app</h1>");
    }

    #[tokio::test]
    async fn test_etag_revalidation() {
        let dir = bundle();
        let cfg = config(&dir);
        let first = serve(&ctx("/assets/app.js"), &cfg).await;
        let etag = first.headers()["ETag"].to_str().unwrap().to_string();

        let revalidate = RequestContext {
            path: "/assets/app.js",
            is_head: false,
            if_none_match: Some(etag),
        };
        assert_eq!(serve(&revalidate, &cfg).await.status(), 304);
    }
}
