// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! SearXNG HTTP client
//!
//! Issues one GET per call against a self-hosted SearXNG instance and
//! returns the decoded JSON document. The async and blocking paths share
//! [`build_params`] and the same status and decode handling.

use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::params::{build_params, QueryParams, SearxngRequest};
use crate::search::config::SearxngConfig;
use crate::search::http::{
    build_blocking_client, build_client, check_status, parse_json, request_error,
};
use crate::search::types::{validate_query, SearchError};

/// Client for a SearXNG instance
#[derive(Debug, Clone)]
pub struct SearxngClient {
    config: SearxngConfig,
    client: reqwest::Client,
}

impl SearxngClient {
    /// Create a client; a missing base URL is reported per call, not here
    pub fn new(config: SearxngConfig) -> Result<Self, SearchError> {
        let client = build_client(config.timeout())?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &SearxngConfig {
        &self.config
    }

    pub fn is_configured(&self) -> bool {
        self.base_url().is_some()
    }

    /// Start a request seeded with the configured defaults
    pub fn request(&self, query: impl Into<String>) -> SearxngRequest {
        let mut request = SearxngRequest::new(query).language(self.config.default_language.clone());
        request.categories = self.config.default_categories.clone();
        request.engines = self.config.default_engines.clone();
        request
    }

    /// Parameters that would be sent for `request`
    pub fn params(&self, request: &SearxngRequest) -> QueryParams {
        build_params(request, self.config.image_engine_policy)
    }

    /// Fetch the raw SearXNG document
    pub async fn raw_results(&self, request: &SearxngRequest) -> Result<Value, SearchError> {
        let (url, params) = self.prepare(request)?;
        debug!("SearXNG query '{}' ({} params)", request.query, params.len());

        let response = self
            .client
            .get(url)
            .query(&params)
            .send()
            .await
            .map_err(|e| request_error(e, self.timeout()))?;

        check_status(response.status())?;

        let body = response
            .text()
            .await
            .map_err(|e| request_error(e, self.timeout()))?;
        parse_json(&body)
    }

    /// Fetch the raw SearXNG document, blocking the calling thread
    ///
    /// Must not be called from inside an async context; use
    /// `tokio::task::spawn_blocking` there.
    pub fn raw_results_blocking(&self, request: &SearxngRequest) -> Result<Value, SearchError> {
        let (url, params) = self.prepare(request)?;
        debug!(
            "SearXNG blocking query '{}' ({} params)",
            request.query,
            params.len()
        );

        let client = build_blocking_client(self.timeout())?;
        let response = client
            .get(url)
            .query(&params)
            .send()
            .map_err(|e| request_error(e, self.timeout()))?;

        check_status(response.status())?;

        let body = response
            .text()
            .map_err(|e| request_error(e, self.timeout()))?;
        parse_json(&body)
    }

    /// Checks that run before any I/O
    fn prepare(&self, request: &SearxngRequest) -> Result<(&str, QueryParams), SearchError> {
        let url = self
            .base_url()
            .ok_or_else(|| SearchError::not_configured("searxng", "SEARXNG_URL"))?;
        validate_query(&request.query, request.max_results)?;
        Ok((url, self.params(request)))
    }

    fn base_url(&self) -> Option<&str> {
        self.config
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    fn timeout(&self) -> Duration {
        self.config.timeout()
    }
}
