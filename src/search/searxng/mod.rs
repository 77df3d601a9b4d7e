// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! SearXNG metasearch backend
//!
//! ```text
//! query → SearxngRequest → build_params → GET (async | blocking) → JSON → normalize
//! ```

pub mod client;
pub mod normalize;
pub mod params;

use async_trait::async_trait;

pub use client::SearxngClient;
pub use normalize::normalize;
pub use params::{build_params, QueryParams, SearxngRequest};

use super::config::SearxngConfig;
use super::provider::SearchProvider;
use super::types::{SearchError, SearchResponse};

/// SearXNG search provider
pub struct SearxngProvider {
    client: SearxngClient,
    include_images: bool,
}

impl SearxngProvider {
    pub fn new(config: SearxngConfig, include_images: bool) -> Result<Self, SearchError> {
        Ok(Self {
            client: SearxngClient::new(config)?,
            include_images,
        })
    }

    pub fn client(&self) -> &SearxngClient {
        &self.client
    }

    fn request_for(&self, query: &str, num_results: usize) -> SearxngRequest {
        self.client
            .request(query)
            .max_results(num_results)
            .include_images(self.include_images)
    }
}

#[async_trait]
impl SearchProvider for SearxngProvider {
    async fn search(
        &self,
        query: &str,
        num_results: usize,
    ) -> Result<SearchResponse, SearchError> {
        let request = self.request_for(query, num_results);
        let raw = self.client.raw_results(&request).await?;
        let records = normalize(&raw);
        Ok(SearchResponse::new(query, self.name(), records, raw))
    }

    fn search_blocking(
        &self,
        query: &str,
        num_results: usize,
    ) -> Result<SearchResponse, SearchError> {
        let request = self.request_for(query, num_results);
        let raw = self.client.raw_results_blocking(&request)?;
        let records = normalize(&raw);
        Ok(SearchResponse::new(query, self.name(), records, raw))
    }

    fn name(&self) -> &'static str {
        "searxng"
    }

    fn is_available(&self) -> bool {
        self.client.is_configured()
    }
}
