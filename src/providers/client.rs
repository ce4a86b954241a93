//! Shared upstream HTTP plumbing for provider adapters

use reqwest::header::HeaderMap;
use reqwest::Client;
use serde_json::Value;

use crate::translator::{ProviderRequest, TranslatorError};

/// Upper bound on raw error-body text echoed back to callers
const MAX_ERROR_BODY: usize = 300;

/// Build the reqwest client every adapter shares
pub fn build_client(server_name: &str) -> reqwest::Result<Client> {
    Client::builder().user_agent(server_name).build()
}

/// Join an API root and an endpoint path
pub fn url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Send a GET and decode the JSON body
///
/// Non-2xx responses and transport failures both become
/// [`TranslatorError::ProviderRequestFailed`].
pub async fn get_json(
    client: &Client,
    provider: &'static str,
    base_url: &str,
    headers: HeaderMap,
    request: &ProviderRequest,
) -> Result<Value, TranslatorError> {
    let response = client
        .get(url(base_url, &request.path))
        .headers(headers)
        .query(&request.params)
        .send()
        .await
        .map_err(|e| transport_error(provider, &e))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body)
            .or_else(|| status.canonical_reason().map(ToString::to_string))
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
        return Err(TranslatorError::provider_failed(
            provider,
            Some(status.as_u16()),
            message,
        ));
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| transport_error(provider, &e))
}

fn transport_error(provider: &'static str, err: &reqwest::Error) -> TranslatorError {
    TranslatorError::provider_failed(provider, err.status().map(|s| s.as_u16()), err.to_string())
}

/// Best-effort message from an upstream error body
pub fn error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    if let Ok(json) = serde_json::from_str::<Value>(body) {
        let candidates = [
            json.get("message"),
            json.pointer("/error/message"),
            json.get("error"),
            json.get("detail"),
            json.pointer("/errors/0/message"),
        ];
        if let Some(msg) = candidates
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
            .map(str::trim)
            .find(|m| !m.is_empty())
        {
            return Some(msg.to_string());
        }
    }

    Some(body.chars().take(MAX_ERROR_BODY).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_fields() {
        assert_eq!(
            error_message(r#"{"message":"Invalid API key"}"#).as_deref(),
            Some("Invalid API key")
        );
        assert_eq!(
            error_message(r#"{"error":{"message":"quota exceeded"}}"#).as_deref(),
            Some("quota exceeded")
        );
        assert_eq!(
            error_message(r#"{"errors":[{"message":"bad term"}]}"#).as_deref(),
            Some("bad term")
        );
    }

    #[test]
    fn test_error_message_plain_text() {
        assert_eq!(error_message("Bad Gateway").as_deref(), Some("Bad Gateway"));
        assert_eq!(error_message("   "), None);
        assert_eq!(error_message(&"x".repeat(1000)).map(|m| m.len()), Some(MAX_ERROR_BODY));
    }

    #[test]
    fn test_url_join() {
        assert_eq!(url("https://api.test/", "/v1/icons"), "https://api.test/v1/icons");
        assert_eq!(url("https://api.test", "/v1/icons"), "https://api.test/v1/icons");
    }
}
