// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! DuckDuckGo search provider
//!
//! Implements web search using DuckDuckGo's HTML interface.
//! No API key required.

use async_trait::async_trait;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use serde_json::json;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::http::{build_client, check_status, request_error};
use super::provider::SearchProvider;
use super::types::{validate_query, PageRecord, SearchError, SearchRecord, SearchResponse};

const DDG_HTML_URL: &str = "https://html.duckduckgo.com/html/";

/// DuckDuckGo search provider (no API key required)
pub struct DuckDuckGoProvider {
    endpoint: String,
    timeout: Duration,
    client: Client,
}

impl DuckDuckGoProvider {
    /// Create a new DuckDuckGo provider
    pub fn new(timeout: Duration) -> Result<Self, SearchError> {
        Ok(Self {
            endpoint: DDG_HTML_URL.to_string(),
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
impl SearchProvider for DuckDuckGoProvider {
    async fn search(
        &self,
        query: &str,
        num_results: usize,
    ) -> Result<SearchResponse, SearchError> {
        validate_query(query, num_results)?;
        debug!("DuckDuckGo query '{}'", query);

        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("q", query)])
            .send()
            .await
            .map_err(|e| request_error(e, self.timeout))?;

        check_status(response.status())?;

        let html = response
            .text()
            .await
            .map_err(|e| request_error(e, self.timeout))?;

        let pages = parse_ddg_html(&html, num_results);
        let raw = json!({ "results": pages });
        let records = pages.into_iter().map(SearchRecord::Page).collect();

        Ok(SearchResponse::new(query, self.name(), records, raw))
    }

    fn name(&self) -> &'static str {
        "duckduckgo"
    }

    fn is_available(&self) -> bool {
        true // No API key needed
    }
}

/// Parse DuckDuckGo HTML response to extract search results
///
/// Each organic hit is a `.result` block holding an `a.result__a` title
/// link and an optional `.result__snippet`. Ads are skipped.
fn parse_ddg_html(html: &str, max_results: usize) -> Vec<PageRecord> {
    let document = Html::parse_document(html);
    let (Ok(block), Ok(link), Ok(snippet)) = (
        Selector::parse(".result"),
        Selector::parse("a.result__a"),
        Selector::parse(".result__snippet"),
    ) else {
        return Vec::new();
    };

    document
        .select(&block)
        .filter(|b| !b.value().classes().any(|c| c == "result--ad"))
        .filter_map(|b| {
            let anchor = b.select(&link).next()?;
            let url = extract_ddg_url(anchor.value().attr("href")?)?;
            let title = element_text(&anchor);
            if title.is_empty() {
                return None;
            }
            let content = b
                .select(&snippet)
                .next()
                .map(|s| element_text(&s))
                .unwrap_or_default();
            Some(PageRecord {
                title,
                url,
                content,
                engine: "duckduckgo".to_string(),
                ..PageRecord::default()
            })
        })
        .take(max_results)
        .collect()
}

/// Extract actual URL from DuckDuckGo's redirect URL
///
/// Links look like `//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com&rut=...`.
fn extract_ddg_url(href: &str) -> Option<String> {
    let absolute = if href.starts_with("//") {
        format!("https:{}", href)
    } else {
        href.to_string()
    };
    let parsed = Url::parse(&absolute).ok()?;

    let target = parsed
        .query_pairs()
        .find(|(key, _)| key == "uddg")
        .map(|(_, value)| value.into_owned());

    match target {
        Some(url) if !url.is_empty() => Some(url),
        _ if parsed.scheme().starts_with("http") && !is_ddg_host(&parsed) => Some(absolute),
        _ => None,
    }
}

fn is_ddg_host(url: &Url) -> bool {
    url.host_str()
        .map(|h| h.ends_with("duckduckgo.com"))
        .unwrap_or(false)
}

fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join("")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
