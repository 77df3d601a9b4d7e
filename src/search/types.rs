// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for web search functionality

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use thiserror::Error;

/// A web page hit, normalized across backends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Title of the page
    #[serde(default)]
    pub title: String,
    /// URL of the page
    #[serde(default)]
    pub url: String,
    /// Content snippet
    #[serde(default)]
    pub content: String,
    /// Relevance score as the backend reported it (0 when absent)
    #[serde(default = "zero_score")]
    pub score: Number,
    /// Engine that produced the hit
    #[serde(default)]
    pub engine: String,
    /// Backend-specific URL breakdown, passed through untouched
    #[serde(default = "empty_object")]
    pub parsed_url: Value,
    /// Published date if the backend reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
}

impl Default for PageRecord {
    fn default() -> Self {
        Self {
            title: String::new(),
            url: String::new(),
            content: String::new(),
            score: zero_score(),
            engine: String::new(),
            parsed_url: empty_object(),
            published_date: None,
        }
    }
}

/// An image hit, normalized across backends
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub image_description: String,
    /// Page the image was found on
    #[serde(default)]
    pub source_url: String,
    #[serde(default)]
    pub engine: String,
}

/// A single normalized search hit
///
/// Serializes with a `type` tag of `"page"` or `"image"`, so a record list
/// can be handed to an agent as plain JSON regardless of which backend
/// produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SearchRecord {
    Page(PageRecord),
    Image(ImageRecord),
}

impl SearchRecord {
    pub fn is_page(&self) -> bool {
        matches!(self, SearchRecord::Page(_))
    }

    pub fn is_image(&self) -> bool {
        matches!(self, SearchRecord::Image(_))
    }

    /// Engine name of the hit, whichever variant it is
    pub fn engine(&self) -> &str {
        match self {
            SearchRecord::Page(page) => &page.engine,
            SearchRecord::Image(image) => &image.engine,
        }
    }
}

/// Response from a search operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// The original search query
    pub query: String,
    /// Provider that returned the results
    pub provider: String,
    /// Normalized hits, pages first then images
    pub records: Vec<SearchRecord>,
    /// The backend document the records were derived from
    pub raw: Value,
    /// Time taken for the search in milliseconds
    pub search_time_ms: u64,
}

impl SearchResponse {
    pub fn new(query: &str, provider: &str, records: Vec<SearchRecord>, raw: Value) -> Self {
        Self {
            query: query.to_string(),
            provider: provider.to_string(),
            records,
            raw,
            search_time_ms: 0,
        }
    }

    pub fn result_count(&self) -> usize {
        self.records.len()
    }
}

/// Errors that can occur during search operations
#[derive(Debug, Error)]
pub enum SearchError {
    /// A required endpoint or credential is missing; raised before any I/O
    #[error("{provider} is not configured: {setting} not set")]
    NotConfigured {
        /// Backend that cannot run
        provider: String,
        /// Name of the missing setting
        setting: String,
    },

    /// Invalid search query
    #[error("Invalid query: {reason}")]
    InvalidQuery {
        /// Reason the query is invalid
        reason: String,
    },

    /// Connection-level failure talking to the backend
    #[error("Search backend unreachable: {message}")]
    Transport { message: String },

    /// Search request timed out
    #[error("Search timeout after {timeout_ms}ms")]
    Timeout {
        /// Timeout duration in milliseconds
        timeout_ms: u64,
    },

    /// Backend answered with a non-success status
    #[error("Error {status}: {reason}")]
    Status { status: u16, reason: String },

    /// Response body could not be decoded
    #[error("Malformed search response: {message}")]
    Parse { message: String },

    /// Backend rejected the configured credential
    #[error("No valid API key configured for {provider}")]
    NoApiKey {
        /// Name of the provider rejecting the key
        provider: String,
    },

    /// Rate limited by the search provider
    #[error("Rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying
        retry_after_secs: u64,
    },
}

/// Coarse classification of a [`SearchError`], stable across backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Configuration,
    InvalidQuery,
    Transport,
    Timeout,
    Status,
    Parse,
    Credentials,
    RateLimited,
}

impl SearchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SearchError::NotConfigured { .. } => ErrorKind::Configuration,
            SearchError::InvalidQuery { .. } => ErrorKind::InvalidQuery,
            SearchError::Transport { .. } => ErrorKind::Transport,
            SearchError::Timeout { .. } => ErrorKind::Timeout,
            SearchError::Status { .. } => ErrorKind::Status,
            SearchError::Parse { .. } => ErrorKind::Parse,
            SearchError::NoApiKey { .. } => ErrorKind::Credentials,
            SearchError::RateLimited { .. } => ErrorKind::RateLimited,
        }
    }

    /// True for the "backend unavailable or malformed response" family:
    /// transport failures, timeouts, non-success statuses and parse errors.
    pub fn is_backend_failure(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Transport | ErrorKind::Timeout | ErrorKind::Status | ErrorKind::Parse
        )
    }

    pub(crate) fn not_configured(provider: &str, setting: &str) -> Self {
        SearchError::NotConfigured {
            provider: provider.to_string(),
            setting: setting.to_string(),
        }
    }
}

/// Reject queries no backend can answer
pub(crate) fn validate_query(query: &str, num_results: usize) -> Result<(), SearchError> {
    if query.trim().is_empty() {
        return Err(SearchError::InvalidQuery {
            reason: "query cannot be empty".to_string(),
        });
    }
    if num_results == 0 {
        return Err(SearchError::InvalidQuery {
            reason: "max_results must be at least 1".to_string(),
        });
    }
    Ok(())
}

pub(crate) fn zero_score() -> Number {
    Number::from(0)
}

pub(crate) fn empty_object() -> Value {
    Value::Object(Map::new())
}
