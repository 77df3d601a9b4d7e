// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tavily Search API provider
//!
//! Hosted search API returning page hits plus, when asked, image hits with
//! generated descriptions.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use super::http::{build_client, check_status, parse_json, request_error};
use super::provider::SearchProvider;
use super::searxng::normalize::{entries, score_field, str_field};
use super::types::{validate_query, ImageRecord, PageRecord, SearchError, SearchRecord, SearchResponse};

const TAVILY_API_URL: &str = "https://api.tavily.com/search";

/// Tavily Search API provider
pub struct TavilySearchProvider {
    api_key: String,
    endpoint: String,
    include_images: bool,
    timeout: Duration,
    client: Client,
}

impl TavilySearchProvider {
    /// Create a new Tavily provider
    ///
    /// # Arguments
    /// * `api_key` - Tavily API key; an empty key fails each call before I/O
    /// * `include_images` - Request image hits with descriptions
    pub fn new(
        api_key: String,
        include_images: bool,
        timeout: Duration,
    ) -> Result<Self, SearchError> {
        Ok(Self {
            api_key,
            endpoint: TAVILY_API_URL.to_string(),
            include_images,
            timeout,
            client: build_client(timeout)?,
        })
    }

    /// Point the provider at another endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn request_body(&self, query: &str, num_results: usize) -> Value {
        json!({
            "query": query,
            "max_results": num_results,
            "search_depth": "advanced",
            "include_raw_content": true,
            "include_images": self.include_images,
            "include_image_descriptions": self.include_images,
        })
    }
}

#[async_trait]
impl SearchProvider for TavilySearchProvider {
    async fn search(
        &self,
        query: &str,
        num_results: usize,
    ) -> Result<SearchResponse, SearchError> {
        if self.api_key.trim().is_empty() {
            return Err(SearchError::not_configured("tavily", "TAVILY_API_KEY"));
        }
        validate_query(query, num_results)?;
        debug!("Tavily query '{}'", query);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(query, num_results))
            .send()
            .await
            .map_err(|e| request_error(e, self.timeout))?;

        match response.status().as_u16() {
            401 | 403 => {
                return Err(SearchError::NoApiKey {
                    provider: "tavily".to_string(),
                })
            }
            429 => {
                return Err(SearchError::RateLimited {
                    retry_after_secs: 60,
                })
            }
            _ => check_status(response.status())?,
        }

        let body = response
            .text()
            .await
            .map_err(|e| request_error(e, self.timeout))?;
        let raw = parse_json(&body)?;
        let records = normalize(&raw);

        Ok(SearchResponse::new(query, self.name(), records, raw))
    }

    fn name(&self) -> &'static str {
        "tavily"
    }

    fn is_available(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

/// Flatten a Tavily document: `results` as pages, then `images`
///
/// Images arrive either as bare URL strings or as `{url, description}`
/// objects depending on whether descriptions were requested.
pub fn normalize(raw: &Value) -> Vec<SearchRecord> {
    let pages = entries(raw, "results").map(|r| {
        SearchRecord::Page(PageRecord {
            title: str_field(r, "title"),
            url: str_field(r, "url"),
            content: str_field(r, "content"),
            score: score_field(r),
            engine: "tavily".to_string(),
            published_date: r
                .get("published_date")
                .and_then(Value::as_str)
                .map(str::to_string),
            ..PageRecord::default()
        })
    });

    let images = entries(raw, "images").map(|image| {
        let (image_url, image_description) = match image {
            Value::String(url) => (url.clone(), String::new()),
            other => (str_field(other, "url"), str_field(other, "description")),
        };
        SearchRecord::Image(ImageRecord {
            image_url,
            image_description,
            source_url: String::new(),
            engine: "tavily".to_string(),
        })
    });

    pages.chain(images).collect()
}
