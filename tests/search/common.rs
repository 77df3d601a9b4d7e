// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Shared fixtures for search integration tests

use serde_json::{json, Value};
use web_search_tools::search::{SearxngClient, SearxngConfig};

/// Address nothing listens on
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:1/search";

pub fn searxng_client(base_url: &str) -> SearxngClient {
    SearxngClient::new(SearxngConfig {
        timeout_secs: 5,
        ..SearxngConfig::with_base_url(base_url)
    })
    .unwrap()
}

/// A SearXNG document with two pages and one image
pub fn searxng_document() -> Value {
    json!({
        "query": "cute panda",
        "number_of_results": 2,
        "results": [
            {
                "title": "Giant panda - Wikipedia",
                "url": "https://en.wikipedia.org/wiki/Giant_panda",
                "content": "The giant panda is a bear species endemic to China.",
                "score": 4.0,
                "engine": "wikipedia",
                "parsed_url": ["https", "en.wikipedia.org", "/wiki/Giant_panda", "", "", ""]
            },
            {
                "title": "Panda facts",
                "url": "https://example.org/panda",
                "engine": "duckduckgo"
            }
        ],
        "images": [
            {
                "img_src": "https://img.example.org/panda.jpg",
                "title": "Panda eating bamboo",
                "url": "https://example.org/gallery",
                "engine": "bing images"
            }
        ]
    })
}
