// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search service
//!
//! Wires the one configured backend and times each call. The backend is a
//! static choice made at construction; a failing backend is reported, never
//! replaced by another one.

use std::time::Instant;
use tracing::{debug, info};

use super::arxiv::ArxivProvider;
use super::brave::BraveSearchProvider;
use super::config::{SearchConfig, SearchEngine};
use super::duckduckgo::DuckDuckGoProvider;
use super::provider::SearchProvider;
use super::searxng::SearxngProvider;
use super::tavily::TavilySearchProvider;
use super::types::{SearchError, SearchResponse};

/// Search service backed by a single provider
pub struct SearchService {
    provider: Box<dyn SearchProvider>,
    default_num_results: usize,
}

impl SearchService {
    /// Create a search service from configuration
    ///
    /// The configuration is validated first.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let provider = build_provider(config)?;
        debug!("Search provider {} selected", provider.name());
        Ok(Self::with_provider(provider, config.max_results))
    }

    /// Create a search service around an existing provider
    pub fn with_provider(provider: Box<dyn SearchProvider>, default_num_results: usize) -> Self {
        Self {
            provider,
            default_num_results,
        }
    }

    /// Perform a search
    ///
    /// # Arguments
    /// * `query` - The search query
    /// * `num_results` - Optional number of results (uses default if None)
    pub async fn search(
        &self,
        query: &str,
        num_results: Option<usize>,
    ) -> Result<SearchResponse, SearchError> {
        let num_results = num_results.unwrap_or(self.default_num_results);
        let start = Instant::now();

        let mut response = self.provider.search(query, num_results).await?;
        self.finish(&mut response, start);
        Ok(response)
    }

    /// Perform a search, blocking the calling thread
    pub fn search_blocking(
        &self,
        query: &str,
        num_results: Option<usize>,
    ) -> Result<SearchResponse, SearchError> {
        let num_results = num_results.unwrap_or(self.default_num_results);
        let start = Instant::now();

        let mut response = self.provider.search_blocking(query, num_results)?;
        self.finish(&mut response, start);
        Ok(response)
    }

    fn finish(&self, response: &mut SearchResponse, start: Instant) {
        response.search_time_ms = start.elapsed().as_millis() as u64;
        info!(
            "Search complete: {} results from {} in {}ms",
            response.result_count(),
            self.provider.name(),
            response.search_time_ms
        );
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub fn is_available(&self) -> bool {
        self.provider.is_available()
    }

    pub fn default_num_results(&self) -> usize {
        self.default_num_results
    }
}

/// Build the provider named by `config.engine`
pub fn build_provider(config: &SearchConfig) -> Result<Box<dyn SearchProvider>, SearchError> {
    let timeout = config.timeout();
    let provider: Box<dyn SearchProvider> = match config.engine {
        SearchEngine::Tavily => Box::new(TavilySearchProvider::new(
            config.providers.tavily_api_key.clone().unwrap_or_default(),
            config.include_images,
            timeout,
        )?),
        SearchEngine::DuckDuckGo => Box::new(DuckDuckGoProvider::new(timeout)?),
        SearchEngine::Brave => Box::new(BraveSearchProvider::new(
            config.providers.brave_api_key.clone().unwrap_or_default(),
            timeout,
        )?),
        SearchEngine::Arxiv => Box::new(ArxivProvider::new(timeout)?),
        SearchEngine::Searxng => Box::new(SearxngProvider::new(
            config.searxng_config(),
            config.include_images,
        )?),
    };
    Ok(provider)
}
