// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Web search backends
//!
//! Every backend answers a query with the same normalized records:
//! - SearXNG metasearch (blocking and async clients, image engines)
//! - Tavily hosted search with image hits
//! - Brave Search API and DuckDuckGo HTML
//! - arXiv paper search
//!
//! No caching, retries, rate limiting or cross-backend ranking happen here.

pub mod arxiv;
pub mod brave;
pub mod config;
pub mod duckduckgo;
pub mod http;
pub mod provider;
pub mod searxng;
pub mod service;
pub mod tavily;
pub mod types;

// Re-export commonly used types
pub use config::{
    ImageEnginePolicy, SearchConfig, SearchEngine, SearchProviderConfig, SearxngConfig,
    IMAGE_ENGINES,
};
pub use provider::SearchProvider;
pub use searxng::{SearxngClient, SearxngProvider, SearxngRequest};
pub use service::SearchService;
pub use types::{
    ErrorKind, ImageRecord, PageRecord, SearchError, SearchRecord, SearchResponse,
};
