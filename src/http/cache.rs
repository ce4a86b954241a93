//! HTTP cache control module
//!
//! Provides `ETag` generation, conditional request handling and the
//! `Cache-Control` policies used for the front-end bundle.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Generate `ETag` using fast hashing
///
/// Returns a quoted `ETag` string, e.g. `"abc123def"`
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    let v = hasher.finish();
    format!("\"{v:x}\"")
}

/// Check if client's `If-None-Match` header matches the server's `ETag`
///
/// Supports a single `ETag`, a comma-separated list, and the `*` wildcard.
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|client_etag| {
        client_etag
            .split(',')
            .any(|e| e.trim() == etag || e.trim() == "*")
    })
}

/// Cache control policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Public cache with specified max-age (seconds)
    Public(u32),
    /// Revalidate on every use; for documents that reference hashed assets
    NoCache,
    /// Never store; for API responses
    NoStore,
}

impl CachePolicy {
    /// Convert to Cache-Control header value
    pub fn to_header_value(self) -> String {
        match self {
            Self::Public(max_age) => format!("public, max-age={max_age}"),
            Self::NoCache => "no-cache".to_string(),
            Self::NoStore => "no-store".to_string(),
        }
    }

    /// Policy for a static file, by content type
    pub fn for_content_type(content_type: &str) -> Self {
        if content_type.starts_with("text/html") {
            Self::NoCache
        } else {
            Self::default()
        }
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::Public(3600) // 1 hour
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_etag_consistency() {
        let etag1 = generate_etag(b"same content");
        let etag2 = generate_etag(b"same content");
        assert_eq!(etag1, etag2);
        assert!(etag1.starts_with('"') && etag1.ends_with('"'));
        assert_ne!(etag1, generate_etag(b"other content"));
    }

    #[test]
    fn test_check_etag_match() {
        let etag = "\"abc123\"";
        assert!(check_etag_match(Some("\"abc123\""), etag));
        assert!(check_etag_match(Some("\"xyz\", \"abc123\""), etag));
        assert!(check_etag_match(Some("*"), etag));
        assert!(!check_etag_match(Some("\"different\""), etag));
        assert!(!check_etag_match(None, etag));
    }

    #[test]
    fn test_policy_by_content_type() {
        assert_eq!(
            CachePolicy::for_content_type("text/html; charset=utf-8"),
            CachePolicy::NoCache
        );
        assert_eq!(
            CachePolicy::for_content_type("application/javascript").to_header_value(),
            "public, max-age=3600"
        );
        assert_eq!(CachePolicy::NoStore.to_header_value(), "no-store");
    }
}
