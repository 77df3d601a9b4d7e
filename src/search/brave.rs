// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Brave Search API provider
//!
//! Implements web search using the Brave Search API.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::http::{build_client, check_status, parse_json, request_error};
use super::provider::SearchProvider;
use super::searxng::normalize::{entries, str_field};
use super::types::{validate_query, PageRecord, SearchError, SearchRecord, SearchResponse};

const BRAVE_API_URL: &str = "https://api.search.brave.com/res/v1/web/search";

/// Brave caps `count` at 20
const MAX_COUNT: usize = 20;

/// Brave Search API provider
pub struct BraveSearchProvider {
    api_key: String,
    endpoint: String,
    timeout: Duration,
    client: Client,
}

impl BraveSearchProvider {
    /// Create a new Brave Search provider
    ///
    /// # Arguments
    /// * `api_key` - Brave Search API key
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, SearchError> {
        Ok(Self {
            api_key,
            endpoint: BRAVE_API_URL.to_string(),
            timeout,
            client: build_client(timeout)?,
        })
    }

    /// Point the provider at another endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl SearchProvider for BraveSearchProvider {
    async fn search(
        &self,
        query: &str,
        num_results: usize,
    ) -> Result<SearchResponse, SearchError> {
        if self.api_key.trim().is_empty() {
            return Err(SearchError::not_configured("brave", "BRAVE_SEARCH_API_KEY"));
        }
        validate_query(query, num_results)?;
        debug!("Brave query '{}'", query);

        let response = self
            .client
            .get(&self.endpoint)
            .header("X-Subscription-Token", &self.api_key)
            .header("Accept", "application/json")
            .query(&[
                ("q", query),
                ("count", &num_results.min(MAX_COUNT).to_string()),
            ])
            .send()
            .await
            .map_err(|e| request_error(e, self.timeout))?;

        let status = response.status();

        if status == 429 {
            return Err(SearchError::RateLimited {
                retry_after_secs: 60,
            });
        }

        if status == 401 || status == 403 {
            return Err(SearchError::NoApiKey {
                provider: "brave".to_string(),
            });
        }

        check_status(status)?;

        let body = response
            .text()
            .await
            .map_err(|e| request_error(e, self.timeout))?;
        let raw = parse_json(&body)?;
        let records = normalize(&raw);

        Ok(SearchResponse::new(query, self.name(), records, raw))
    }

    fn name(&self) -> &'static str {
        "brave"
    }

    fn is_available(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

/// Map Brave's `web.results` onto page records
///
/// Entries are read one by one, so a null or mistyped field only empties
/// that field.
pub fn normalize(raw: &Value) -> Vec<SearchRecord> {
    let web = raw.get("web").unwrap_or(&Value::Null);

    entries(web, "results")
        .map(|r| {
            SearchRecord::Page(PageRecord {
                title: str_field(r, "title"),
                url: str_field(r, "url"),
                content: str_field(r, "description"),
                engine: "brave".to_string(),
                published_date: r.get("age").and_then(Value::as_str).map(str::to_string),
                ..PageRecord::default()
            })
        })
        .collect()
}
