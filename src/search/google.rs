use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use super::{SearchItem, WebSearch};
use crate::error::SearchBackendError;

/// Google Custom Search JSON API client bound to one search engine.
#[derive(Debug, Clone)]
pub struct CustomSearchClient {
    client: reqwest::Client,
    api_key: String,
    engine_id: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    // absent when the query has no hits
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl CustomSearchClient {
    pub fn new(api_key: &str, engine_id: &str, base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.to_string(),
            engine_id: engine_id.to_string(),
            base_url: base_url.to_string(),
        }
    }

    fn request(&self, query: &str, num_results: u32) -> reqwest::RequestBuilder {
        let num = num_results.to_string();
        self.client.get(&self.base_url).query(&[
            ("key", self.api_key.as_str()),
            ("cx", self.engine_id.as_str()),
            ("q", query),
            ("num", num.as_str()),
        ])
    }
}

#[async_trait]
impl WebSearch for CustomSearchClient {
    async fn search(
        &self,
        query: &str,
        num_results: u32,
    ) -> Result<Vec<SearchItem>, SearchBackendError> {
        let response = self.request(query, num_results).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(http_error(status, &body));
        }

        let data: SearchResponse = response.json().await?;
        debug!(items = data.items.len(), "Custom Search returned");

        Ok(data.items)
    }
}

fn http_error(status: StatusCode, body: &str) -> SearchBackendError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.to_string());

    SearchBackendError::Http {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        message,
    }
}
