//! IconScout provider adapter
//!
//! Header-credential API (`Client-ID`) with one search endpoint and an `asset`
//! parameter. Icons, 3D, illustrations and Lottie animations are native;
//! photos are approximated with illustrations.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use serde_json::Value;

use super::client;
use crate::translator::normalize::{id_string, RawAsset, Thumbnail};
use crate::translator::{
    AssetKind, AssetProvider, Category, KindProfile, NormalizedAsset, ProviderPage,
    ProviderRequest, SearchQuery, TranslatorError,
};

pub const BASE_URL: &str = "https://api.iconscout.com";
const CLIENT_ID_HEADER: &str = "client-id";
const MAX_PAGE_SIZE: u32 = 100;

const PHOTO_NOTE: &str = "Photos are not offered upstream; showing illustration results instead.";

/// `urls` keys in fallback order, with the pixel size they represent
const URL_KEYS: &[(&str, Option<u32>)] = &[
    ("thumb", None),
    ("png_64", Some(64)),
    ("png_128", Some(128)),
    ("png_256", Some(256)),
    ("png_512", Some(512)),
];

pub struct IconscoutProvider {
    client: Client,
    base_url: String,
    client_id: Option<String>,
}

impl IconscoutProvider {
    pub fn new(client: Client, base_url: Option<&str>, client_id: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.unwrap_or(BASE_URL).to_string(),
            client_id: client_id.filter(|k| !k.trim().is_empty()),
        }
    }

    fn headers(&self) -> Result<HeaderMap, TranslatorError> {
        let mut headers = HeaderMap::new();
        let id = self.client_id.as_deref().unwrap_or_default();
        let value = HeaderValue::from_str(id).map_err(|e| {
            TranslatorError::provider_failed(self.name(), None, format!("Invalid client id: {e}"))
        })?;
        headers.insert(CLIENT_ID_HEADER, value);
        Ok(headers)
    }
}

#[async_trait]
impl AssetProvider for IconscoutProvider {
    fn name(&self) -> &'static str {
        "iconscout"
    }

    fn max_page_size(&self) -> u32 {
        MAX_PAGE_SIZE
    }

    fn is_configured(&self) -> bool {
        self.client_id.is_some()
    }

    fn credential_env(&self) -> &'static str {
        "ICONSCOUT_CLIENT_ID"
    }

    fn profile(&self, kind: AssetKind) -> KindProfile {
        match kind {
            AssetKind::Icon => KindProfile::native("icon"),
            AssetKind::ThreeD => KindProfile::native("3d"),
            AssetKind::Illustration | AssetKind::Vector => KindProfile::native("illustration"),
            AssetKind::Animation => KindProfile::native("lottie"),
            AssetKind::Photo => KindProfile {
                note: Some(PHOTO_NOTE),
                ..KindProfile::native("illustration")
            },
        }
    }

    fn build_request(&self, query: &SearchQuery, profile: &KindProfile) -> ProviderRequest {
        let asset = match profile.category {
            Category::Native(name) => name,
            Category::Icon => "icon",
            Category::Resource => "illustration",
        };
        let request = ProviderRequest::new("/v3/search")
            .param("query", profile.augment_term(&query.term))
            .param("asset", asset)
            .param("page", query.page)
            .param("per_page", query.page_size)
            .param("sort", "relevant");
        if profile.free_only {
            request.param("price", "free")
        } else {
            request
        }
    }

    async fn execute(&self, request: &ProviderRequest) -> Result<ProviderPage, TranslatorError> {
        let body =
            client::get_json(&self.client, self.name(), &self.base_url, self.headers()?, request)
                .await?;
        Ok(parse_page(&body))
    }
}

/// Decode a `/v3/search` payload; pagination is the `items` object minus its data
fn parse_page(body: &Value) -> ProviderPage {
    let Some(items) = body.pointer("/response/items").and_then(Value::as_object) else {
        return ProviderPage::default();
    };

    let assets = items
        .get("data")
        .and_then(Value::as_array)
        .map(|data| data.iter().filter_map(normalize_item).collect())
        .unwrap_or_default();

    let mut pagination = items.clone();
    pagination.remove("data");

    ProviderPage {
        assets,
        pagination: Value::Object(pagination),
    }
}

fn normalize_item(item: &Value) -> Option<NormalizedAsset> {
    let urls = item.get("urls");
    let thumbnails = URL_KEYS
        .iter()
        .filter_map(|(key, px)| {
            let url = urls?.get(*key)?.as_str()?;
            Some(Thumbnail {
                url: url.to_string(),
                width: *px,
                size: None,
            })
        })
        .collect();

    let full_url = urls
        .and_then(|u| u.get("original"))
        .or_else(|| item.get("image"))
        .and_then(Value::as_str);

    RawAsset {
        id: id_string(item.get("id")).or_else(|| id_string(item.get("uuid"))),
        names: vec![
            item.get("name").and_then(Value::as_str),
            item.get("title").and_then(Value::as_str),
            item.get("filename").and_then(Value::as_str),
        ],
        thumbnails,
        full_url,
    }
    .normalize()
}
