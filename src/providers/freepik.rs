//! Freepik provider adapter
//!
//! Keyed-credential REST API with a native icon catalogue (`/v1/icons`) and a
//! generic resource catalogue (`/v1/resources`) narrowed by `filters[...]`
//! parameters. 3D and animated assets have no category of their own and go
//! through the generic profile table.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::Client;
use serde_json::Value;

use super::client;
use crate::translator::normalize::{id_string, RawAsset, Thumbnail};
use crate::translator::{
    AssetProvider, Category, KindProfile, ProviderPage, ProviderRequest, SearchQuery,
    TranslatorError,
};

pub const BASE_URL: &str = "https://api.freepik.com";
const API_KEY_HEADER: &str = "x-freepik-api-key";
const MAX_PAGE_SIZE: u32 = 100;

pub struct FreepikProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl FreepikProvider {
    pub fn new(client: Client, base_url: Option<&str>, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.unwrap_or(BASE_URL).to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    fn headers(&self) -> Result<HeaderMap, TranslatorError> {
        let mut headers = HeaderMap::new();
        let key = self.api_key.as_deref().unwrap_or_default();
        let value = HeaderValue::from_str(key).map_err(|e| {
            TranslatorError::provider_failed(self.name(), None, format!("Invalid API key: {e}"))
        })?;
        headers.insert(API_KEY_HEADER, value);
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US"));
        Ok(headers)
    }
}

#[async_trait]
impl AssetProvider for FreepikProvider {
    fn name(&self) -> &'static str {
        "freepik"
    }

    fn max_page_size(&self) -> u32 {
        MAX_PAGE_SIZE
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn credential_env(&self) -> &'static str {
        "FREEPIK_API_KEY"
    }

    fn build_request(&self, query: &SearchQuery, profile: &KindProfile) -> ProviderRequest {
        let term = profile.augment_term(&query.term);
        match profile.category {
            Category::Icon => {
                let request = ProviderRequest::new("/v1/icons")
                    .param("term", term)
                    .param("page", query.page)
                    .param("per_page", query.page_size)
                    .param("order", "relevance");
                if profile.free_only {
                    request.param("filters[free_svg]", "free")
                } else {
                    request
                }
            }
            Category::Resource | Category::Native(_) => {
                let mut request = ProviderRequest::new("/v1/resources")
                    .param("term", term)
                    .param("page", query.page)
                    .param("limit", query.page_size)
                    .param("order", "relevance");
                if let Some(content_type) = profile.content_type {
                    request = request.param(format!("filters[content_type][{}]", content_type.as_str()), 1);
                }
                if let Some(style) = profile.style {
                    request = request.param("filters[vector][style]", style);
                }
                if profile.free_only {
                    request = request.param("filters[license][freemium]", 1);
                }
                request
            }
        }
    }

    async fn execute(&self, request: &ProviderRequest) -> Result<ProviderPage, TranslatorError> {
        let body =
            client::get_json(&self.client, self.name(), &self.base_url, self.headers()?, request)
                .await?;
        Ok(parse_page(&body))
    }
}

/// Decode a `/v1/icons` or `/v1/resources` payload
fn parse_page(body: &Value) -> ProviderPage {
    let assets = body
        .get("data")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(normalize_item).collect())
        .unwrap_or_default();

    ProviderPage {
        assets,
        pagination: body.get("meta").cloned().unwrap_or(Value::Null),
    }
}

fn normalize_item(item: &Value) -> Option<crate::translator::NormalizedAsset> {
    let full_url = item
        .pointer("/image/source/url")
        .or_else(|| item.pointer("/image/url"))
        .or_else(|| item.get("image"))
        .and_then(Value::as_str);

    RawAsset {
        id: id_string(item.get("id")),
        names: vec![
            item.get("name").and_then(Value::as_str),
            item.get("title").and_then(Value::as_str),
            item.get("filename").and_then(Value::as_str),
        ],
        thumbnails: thumbnails(item.get("thumbnails")),
        full_url,
    }
    .normalize()
}

fn thumbnails(value: Option<&Value>) -> Vec<Thumbnail> {
    let Some(list) = value.and_then(Value::as_array) else {
        return Vec::new();
    };
    list.iter()
        .filter_map(|t| {
            let url = t.get("url").and_then(Value::as_str)?;
            Some(Thumbnail {
                url: url.to_string(),
                width: t.get("width").and_then(pixels),
                size: t.get("size").and_then(Value::as_str).map(ToString::to_string),
            })
        })
        .collect()
}

/// Pixel count given either as a number or a numeric string
fn pixels(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().trim_end_matches("px").parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translator::{AssetKind, Translator};
    use serde_json::json;
    use std::sync::Arc;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(base_url: &str, key: Option<&str>) -> FreepikProvider {
        FreepikProvider::new(Client::new(), Some(base_url), key.map(ToString::to_string))
    }

    fn icons_fixture() -> Value {
        json!({
            "data": [
                {
                    "id": 101,
                    "name": "Cat",
                    "thumbnails": [
                        { "url": "https://cdn/cat-256.png", "width": 256, "height": 256 },
                        { "url": "https://cdn/cat-64.png", "width": 64, "height": 64 },
                        { "url": "https://cdn/cat-128.png", "width": 128, "height": 128 }
                    ]
                },
                {
                    "id": "102",
                    "title": "",
                    "filename": "dog.svg",
                    "thumbnails": []
                },
                { "name": "no id, dropped" }
            ],
            "meta": { "current_page": 1, "per_page": 20, "total": 2, "last_page": 1 }
        })
    }

    #[test]
    fn test_parse_icons_page() {
        let page = parse_page(&icons_fixture());
        assert_eq!(page.assets.len(), 2);

        let cat = &page.assets[0];
        assert_eq!(cat.id, "101");
        assert_eq!(cat.display_name, "Cat");
        assert_eq!(cat.thumbnail_urls.small.as_deref(), Some("https://cdn/cat-64.png"));
        assert_eq!(cat.thumbnail_urls.medium.as_deref(), Some("https://cdn/cat-128.png"));
        assert_eq!(cat.thumbnail_urls.original.as_deref(), Some("https://cdn/cat-256.png"));
        assert_eq!(cat.preview_url.as_deref(), Some("https://cdn/cat-256.png"));

        let dog = &page.assets[1];
        assert_eq!(dog.display_name, "dog.svg");
        assert!(dog.thumbnail_urls.is_empty());
        assert!(dog.preview_url.is_none());
        assert_eq!(page.pagination["total"], 2);
    }

    #[test]
    fn test_parse_resource_uses_full_image() {
        let body = json!({
            "data": [{
                "id": 9,
                "title": "Rocket",
                "image": { "type": "vector", "source": { "url": "https://cdn/rocket.jpg", "size": "626x626" } }
            }]
        });
        let page = parse_page(&body);
        let rocket = &page.assets[0];
        assert_eq!(rocket.display_name, "Rocket");
        assert_eq!(rocket.thumbnail_urls.small.as_deref(), Some("https://cdn/rocket.jpg"));
        assert_eq!(rocket.preview_url.as_deref(), Some("https://cdn/rocket.jpg"));
        assert!(page.pagination.is_null());
    }

    #[test]
    fn test_three_d_request() {
        let p = provider("http://unused", Some("k"));
        let query = SearchQuery::new(AssetKind::ThreeD, "rocket", 2, 30);
        let request = p.build_request(&query, &p.profile(AssetKind::ThreeD));
        assert_eq!(request.path, "/v1/resources");
        assert_eq!(request.get("term"), Some("rocket 3d"));
        assert_eq!(request.get("filters[content_type][vector]"), Some("1"));
        assert_eq!(request.get("filters[vector][style]"), Some("3d"));
        assert_eq!(request.get("filters[license][freemium]"), Some("1"));
        assert_eq!(request.get("limit"), Some("30"));
    }

    #[test]
    fn test_icon_request_clamped() {
        let translator = Translator::new(Arc::new(provider("http://unused", Some("k"))));
        let request = translator.prepare(&SearchQuery::new(AssetKind::Icon, "cat", 1, 500));
        assert_eq!(request.path, "/v1/icons");
        assert_eq!(request.get("per_page"), Some("100"));
        assert_eq!(request.get("filters[free_svg]"), Some("free"));
    }

    #[tokio::test]
    async fn test_search_icons_over_http() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/icons"))
            .and(query_param("term", "cat"))
            .and(header(API_KEY_HEADER, "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(icons_fixture()))
            .expect(1)
            .mount(&server)
            .await;

        let translator = Translator::new(Arc::new(provider(&server.uri(), Some("secret"))));
        let result = translator.search(AssetKind::Icon, "cat", 1, 20).await;

        assert!(result.success);
        assert_eq!(result.data.len(), 2);
        assert!(result.note.is_none());
    }

    #[tokio::test]
    async fn test_animation_is_approximated() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/resources"))
            .and(query_param("term", "cat animation motion"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
            .mount(&server)
            .await;

        let translator = Translator::new(Arc::new(provider(&server.uri(), Some("secret"))));
        let result = translator.search(AssetKind::Animation, "cat", 1, 20).await;

        assert!(result.success);
        assert!(result.note.is_some());
        assert_eq!(result.pagination, json!({}));
    }

    #[tokio::test]
    async fn test_upstream_error_status_mirrored() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/icons"))
            .respond_with(
                ResponseTemplate::new(429).set_body_json(json!({ "message": "Rate limit exceeded" })),
            )
            .mount(&server)
            .await;

        let translator = Translator::new(Arc::new(provider(&server.uri(), Some("secret"))));
        let result = translator.search(AssetKind::Icon, "cat", 1, 20).await;

        assert!(!result.success);
        assert!(result.data.is_empty());
        assert_eq!(result.status, 429);
        assert_eq!(result.message.as_deref(), Some("Rate limit exceeded"));
    }

    #[tokio::test]
    async fn test_missing_key_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let translator = Translator::new(Arc::new(provider(&server.uri(), None)));
        let result = translator.search(AssetKind::Icon, "cat", 1, 20).await;

        assert_eq!(result.error.as_deref(), Some("ConfigurationError"));
        assert_eq!(result.status, 500);
    }

    #[tokio::test]
    async fn test_malformed_body_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let translator = Translator::new(Arc::new(provider(&server.uri(), Some("secret"))));
        let result = translator.search(AssetKind::Icon, "cat", 1, 20).await;

        assert!(!result.success);
        assert_eq!(result.status, 500);
        assert_eq!(result.error.as_deref(), Some("ProviderRequestFailed"));
    }
}
