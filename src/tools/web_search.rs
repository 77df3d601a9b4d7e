// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Web search tool exposed to agents
//!
//! The tool is the only place search errors are absorbed: every call
//! returns a [`ToolOutput`], whether the backend answered or not.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;
use tracing::{info, warn};

use crate::search::types::empty_object;
use crate::search::{ErrorKind, SearchConfig, SearchError, SearchRecord, SearchResponse, SearchService};

/// Name agents call the tool by
pub const DEFAULT_TOOL_NAME: &str = "web_search";

const DEFAULT_DESCRIPTION: &str =
    "Search the web for information. Input should be a search query.";

/// Structured description of a failed search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolFailure {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&SearchError> for ToolFailure {
    fn from(err: &SearchError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Result of one tool call: records or a failure, plus the raw document
///
/// On failure `raw` is always an empty JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutput {
    pub result: Result<Vec<SearchRecord>, ToolFailure>,
    pub raw: Value,
}

impl ToolOutput {
    fn success(response: SearchResponse) -> Self {
        Self {
            result: Ok(response.records),
            raw: response.raw,
        }
    }

    fn failure(err: &SearchError) -> Self {
        Self {
            result: Err(ToolFailure::from(err)),
            raw: empty_object(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// Records of a successful call; empty on failure
    pub fn records(&self) -> &[SearchRecord] {
        self.result.as_deref().unwrap_or(&[])
    }

    pub fn failure_kind(&self) -> Option<ErrorKind> {
        self.result.as_ref().err().map(|f| f.kind)
    }

    /// JSON shape handed back to agents
    pub fn to_json(&self) -> Value {
        match &self.result {
            Ok(records) => json!({ "results": records, "raw": self.raw }),
            Err(failure) => json!({ "error": failure, "raw": self.raw }),
        }
    }
}

/// Web search tool wrapping one configured backend
pub struct WebSearchTool {
    name: String,
    description: String,
    service: SearchService,
}

impl WebSearchTool {
    pub fn new(service: SearchService) -> Self {
        Self {
            name: DEFAULT_TOOL_NAME.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            service,
        }
    }

    /// Build the tool for the backend named in `config`
    pub fn from_config(config: &SearchConfig) -> Result<Self, SearchError> {
        Ok(Self::new(SearchService::new(config)?))
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn provider_name(&self) -> &'static str {
        self.service.provider_name()
    }

    /// Tool definition for agent registration
    pub fn definition(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "input_schema": {
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The search query"
                    }
                },
                "required": ["query"]
            }
        })
    }

    /// Run a search; never returns an error
    pub async fn search(&self, query: &str) -> ToolOutput {
        info!("Tool {} called with query: {}", self.name, query);
        let start = Instant::now();
        let result = self.service.search(query, None).await;
        self.finish(result, start)
    }

    /// Run a search on the calling thread; never returns an error
    ///
    /// Must not be called from inside an async context.
    pub fn search_blocking(&self, query: &str) -> ToolOutput {
        info!("Tool {} called with query: {}", self.name, query);
        let start = Instant::now();
        let result = self.service.search_blocking(query, None);
        self.finish(result, start)
    }

    fn finish(&self, result: Result<SearchResponse, SearchError>, start: Instant) -> ToolOutput {
        let elapsed_ms = start.elapsed().as_millis();
        match result {
            Ok(response) => {
                info!(
                    "Tool {} returned {} records in {}ms",
                    self.name,
                    response.result_count(),
                    elapsed_ms
                );
                ToolOutput::success(response)
            }
            Err(e) => {
                warn!("Tool {} failed after {}ms: {}", self.name, elapsed_ms, e);
                ToolOutput::failure(&e)
            }
        }
    }
}
