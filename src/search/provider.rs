// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search provider trait definition

use async_trait::async_trait;

use super::types::{SearchError, SearchResponse};

/// Trait for implementing search providers
///
/// Every backend answers a query with normalized records plus the raw
/// document they were derived from, so backends can be swapped freely
/// behind the web search tool.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Perform a web search
    ///
    /// # Arguments
    /// * `query` - The search query string
    /// * `num_results` - Maximum number of results to request
    async fn search(&self, query: &str, num_results: usize)
        -> Result<SearchResponse, SearchError>;

    /// Perform a web search, blocking the calling thread
    ///
    /// The default drives [`SearchProvider::search`] on a private
    /// current-thread runtime, so it must not be called from inside an
    /// async context. Providers with a native blocking transport override it.
    fn search_blocking(
        &self,
        query: &str,
        num_results: usize,
    ) -> Result<SearchResponse, SearchError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| SearchError::Transport {
                message: format!("failed to start runtime: {}", e),
            })?;
        runtime.block_on(self.search(query, num_results))
    }

    /// Get the provider name for logging
    fn name(&self) -> &'static str;

    /// Check if the provider is available (has API key, endpoint, etc.)
    fn is_available(&self) -> bool;
}
