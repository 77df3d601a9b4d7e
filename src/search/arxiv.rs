// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! arXiv paper search provider
//!
//! Queries the public arXiv export API, which answers with an Atom feed.
//! Each entry becomes a page whose content is the paper abstract.

use async_trait::async_trait;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use super::http::{build_client, check_status, request_error};
use super::provider::SearchProvider;
use super::types::{validate_query, PageRecord, SearchError, SearchRecord, SearchResponse};

const ARXIV_API_URL: &str = "http://export.arxiv.org/api/query";

/// One paper from the arXiv feed
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ArxivEntry {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub published: String,
    pub authors: Vec<String>,
}

impl From<ArxivEntry> for PageRecord {
    fn from(entry: ArxivEntry) -> Self {
        PageRecord {
            title: entry.title,
            url: entry.id,
            content: entry.summary,
            engine: "arxiv".to_string(),
            published_date: Some(entry.published).filter(|p| !p.is_empty()),
            ..PageRecord::default()
        }
    }
}

/// arXiv search provider (no API key required)
pub struct ArxivProvider {
    endpoint: String,
    timeout: Duration,
    client: Client,
}

impl ArxivProvider {
    pub fn new(timeout: Duration) -> Result<Self, SearchError> {
        Ok(Self {
            endpoint: ARXIV_API_URL.to_string(),
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
impl SearchProvider for ArxivProvider {
    async fn search(
        &self,
        query: &str,
        num_results: usize,
    ) -> Result<SearchResponse, SearchError> {
        validate_query(query, num_results)?;
        debug!("arXiv query '{}'", query);

        let search_query = format!("all:{}", query);
        let max_results = num_results.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("search_query", search_query.as_str()),
                ("start", "0"),
                ("max_results", max_results.as_str()),
            ])
            .send()
            .await
            .map_err(|e| request_error(e, self.timeout))?;

        check_status(response.status())?;

        let feed = response
            .text()
            .await
            .map_err(|e| request_error(e, self.timeout))?;

        let entries = parse_feed(&feed);
        let raw = json!({ "entries": entries });
        let records = entries
            .into_iter()
            .map(|entry| SearchRecord::Page(entry.into()))
            .collect();

        Ok(SearchResponse::new(query, self.name(), records, raw))
    }

    fn name(&self) -> &'static str {
        "arxiv"
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Parse the entries of an arXiv Atom feed
///
/// Entries without an id are dropped; every other missing field is empty.
pub fn parse_feed(feed: &str) -> Vec<ArxivEntry> {
    let document = Html::parse_document(feed);
    let (Ok(entry), Ok(id), Ok(title), Ok(summary), Ok(published), Ok(author)) = (
        Selector::parse("entry"),
        Selector::parse("entry > id"),
        Selector::parse("entry > title"),
        Selector::parse("entry > summary"),
        Selector::parse("entry > published"),
        Selector::parse("entry > author > name"),
    ) else {
        return Vec::new();
    };

    document
        .select(&entry)
        .filter_map(|e| {
            let first = |selector: &Selector| {
                e.select(selector)
                    .next()
                    .map(|el| collapse(&el))
                    .unwrap_or_default()
            };
            let entry = ArxivEntry {
                id: first(&id),
                title: first(&title),
                summary: first(&summary),
                published: first(&published),
                authors: e.select(&author).map(|el| collapse(&el)).collect(),
            };
            (!entry.id.is_empty()).then_some(entry)
        })
        .collect()
}

/// Text of an element with runs of whitespace collapsed
fn collapse(element: &ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
