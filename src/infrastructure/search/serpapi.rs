//! SerpAPI-backed search provider.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::domain::providers::{ProviderError, SearchProvider, search_provider::TOP_RESULTS};

/// Longest error body kept in [`ProviderError::Status`].
const MAX_ERROR_BODY: usize = 200;

/// Fetches Google organic results through SerpAPI.
///
/// Sends `GET {endpoint}?engine=google&q=<query>&api_key=<key>&num=10` and
/// reads the result links from the JSON payload (see [`extract_result_links`]).
pub struct SerpApiProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    timeout: Duration,
}

impl SerpApiProvider {
    /// Creates a provider with a per-request `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the HTTP client cannot be built.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("citation-overlap/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ProviderError::Http(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            timeout,
        })
    }

    /// Maps a transport failure, dropping the request URL since its query
    /// string carries the API key.
    fn transport_error(&self, err: reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout(self.timeout)
        } else {
            ProviderError::Http(err.without_url().to_string())
        }
    }
}

#[async_trait]
impl SearchProvider for SerpApiProvider {
    async fn fetch_top_results(&self, query: &str) -> Result<Vec<String>, ProviderError> {
        let num = TOP_RESULTS.to_string();

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("engine", "google"),
                ("q", query),
                ("api_key", self.api_key.as_str()),
                ("num", num.as_str()),
            ])
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        let payload: Value = serde_json::from_str(&body)
            .map_err(|e| ProviderError::MalformedPayload(e.to_string()))?;

        let links = extract_result_links(&payload)?;
        debug!(query, results = links.len(), "Fetched reference results");

        Ok(links)
    }

    fn name(&self) -> &'static str {
        "serpapi"
    }
}

/// Reads up to [`TOP_RESULTS`] result links from a SerpAPI payload.
///
/// Links come from `organic_results[].link` (or `.url` when `link` is
/// absent) in array order. When that yields nothing, `top_results[].link`
/// is used instead. Items without a usable link are skipped.
///
/// # Errors
///
/// Returns [`ProviderError::MalformedPayload`] if the payload is not a JSON
/// object, or if it carries an `error` message and no results.
pub fn extract_result_links(payload: &Value) -> Result<Vec<String>, ProviderError> {
    let object = payload
        .as_object()
        .ok_or_else(|| ProviderError::MalformedPayload("expected a JSON object".to_string()))?;

    let organic = links_from(object.get("organic_results"), &["link", "url"]);
    if !organic.is_empty() {
        return Ok(organic);
    }

    let top = links_from(object.get("top_results"), &["link"]);
    if top.is_empty()
        && let Some(message) = object.get("error").and_then(Value::as_str)
    {
        return Err(ProviderError::MalformedPayload(message.to_string()));
    }

    Ok(top)
}

fn links_from(block: Option<&Value>, keys: &[&str]) -> Vec<String> {
    let Some(items) = block.and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| keys.iter().find_map(|key| item.get(*key)?.as_str()))
        .map(str::trim)
        .filter(|link| !link.is_empty())
        .take(TOP_RESULTS)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_organic_links_in_order() {
        let payload = json!({
            "organic_results": [
                { "position": 1, "link": "https://a.com/1" },
                { "position": 2, "url": "https://b.com/2" },
                { "position": 3, "title": "no link" },
                { "position": 4, "link": "https://c.com/3" }
            ]
        });

        let links = extract_result_links(&payload).unwrap();
        assert_eq!(links, ["https://a.com/1", "https://b.com/2", "https://c.com/3"]);
    }

    #[test]
    fn test_caps_at_ten() {
        let items: Vec<Value> = (0..15)
            .map(|i| json!({ "link": format!("https://site{i}.com") }))
            .collect();
        let payload = json!({ "organic_results": items });

        let links = extract_result_links(&payload).unwrap();
        assert_eq!(links.len(), TOP_RESULTS);
        assert_eq!(links[9], "https://site9.com");
    }

    #[test]
    fn test_falls_back_to_top_results() {
        let payload = json!({
            "organic_results": [],
            "top_results": [{ "link": "https://x.com" }]
        });

        assert_eq!(extract_result_links(&payload).unwrap(), ["https://x.com"]);
    }

    #[test]
    fn test_no_results_is_empty_not_error() {
        let payload = json!({ "search_metadata": { "status": "Success" } });
        assert!(extract_result_links(&payload).unwrap().is_empty());
    }

    #[test]
    fn test_error_message_without_results() {
        let payload = json!({ "error": "Invalid API key." });

        let err = extract_result_links(&payload).unwrap_err();
        assert_eq!(err, ProviderError::MalformedPayload("Invalid API key.".to_string()));
    }

    #[test]
    fn test_non_object_payload() {
        let err = extract_result_links(&json!(["https://a.com"])).unwrap_err();
        assert!(matches!(err, ProviderError::MalformedPayload(_)));
    }
}
