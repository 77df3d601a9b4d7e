// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! SearXNG request description and query parameter assembly
//!
//! Both the blocking and the async transport send exactly what
//! [`build_params`] returns.

use crate::search::config::{ImageEnginePolicy, IMAGE_ENGINES};

/// Query parameters in the order they are sent upstream
pub type QueryParams = Vec<(&'static str, String)>;

/// One SearXNG search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearxngRequest {
    pub query: String,
    pub max_results: usize,
    /// Language tag, or `"all"`
    pub language: String,
    pub categories: Option<Vec<String>>,
    /// Explicit engine list; `None` lets the instance choose
    pub engines: Option<Vec<String>>,
    /// Response format requested from the instance
    pub format: String,
    pub include_images: bool,
}

impl SearxngRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            max_results: 5,
            language: "all".to_string(),
            categories: None,
            engines: None,
            format: "json".to_string(),
            include_images: false,
        }
    }

    pub fn max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    pub fn engines<I, S>(mut self, engines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.engines = Some(engines.into_iter().map(Into::into).collect());
        self
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn include_images(mut self, include_images: bool) -> Self {
        self.include_images = include_images;
        self
    }
}

/// Assemble the outbound query parameters for a request
///
/// `pageno` is always 1. Empty category or engine lists are treated as
/// absent. When images are wanted, [`IMAGE_ENGINES`] are appended to the
/// engine list according to `policy`.
pub fn build_params(request: &SearxngRequest, policy: ImageEnginePolicy) -> QueryParams {
    let mut params: QueryParams = vec![
        ("q", request.query.clone()),
        ("format", request.format.clone()),
        ("pageno", "1".to_string()),
        ("count", request.max_results.to_string()),
        ("language", request.language.clone()),
    ];

    if let Some(categories) = non_empty(&request.categories) {
        params.push(("categories", categories.join(",")));
    }

    let explicit = non_empty(&request.engines);
    let mut engines: Vec<&str> = explicit
        .map(|e| e.iter().map(String::as_str).collect())
        .unwrap_or_default();

    let append_images = match policy {
        ImageEnginePolicy::WhenNoEngines => explicit.is_none(),
        ImageEnginePolicy::Always => true,
    };
    if request.include_images && append_images {
        engines.extend(IMAGE_ENGINES);
    }

    if !engines.is_empty() {
        params.push(("engines", engines.join(",")));
    }

    params
}

fn non_empty(list: &Option<Vec<String>>) -> Option<&[String]> {
    list.as_deref().filter(|l| !l.is_empty())
}

/// Look up a parameter by name
pub fn param<'a>(params: &'a QueryParams, name: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.as_str())
}
