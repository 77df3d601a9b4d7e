// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use serde_json::json;
use web_search_tools::search::{ErrorKind, SearchConfig, SearchEngine, SearxngConfig};
use web_search_tools::WebSearchTool;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::common::{searxng_document, UNREACHABLE_URL};

fn searxng_tool(base_url: &str, include_images: bool) -> WebSearchTool {
    let config = SearchConfig {
        engine: SearchEngine::Searxng,
        max_results: 4,
        include_images,
        timeout_secs: 5,
        searxng: SearxngConfig::with_base_url(base_url),
        ..SearchConfig::default()
    };
    WebSearchTool::from_config(&config).unwrap()
}

#[tokio::test]
async fn test_tool_returns_records_and_raw() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("q", "cute panda"))
        .and(query_param("count", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(searxng_document()))
        .mount(&server)
        .await;

    let tool = searxng_tool(&format!("{}/search", server.uri()), true);
    assert_eq!(tool.provider_name(), "searxng");

    let output = tool.search("cute panda").await;
    assert!(output.is_ok());
    assert_eq!(output.records().len(), 3);
    assert_eq!(output.raw, searxng_document());

    let value = output.to_json();
    assert_eq!(value["results"][0]["type"], "page");
    assert_eq!(value["results"][0]["title"], "Giant panda - Wikipedia");
    assert_eq!(value["results"][2]["type"], "image");
    assert_eq!(value["results"][2]["image_url"], "https://img.example.org/panda.jpg");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_tool_blocking_matches_async() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(searxng_document()))
        .expect(2)
        .mount(&server)
        .await;

    let tool = searxng_tool(&format!("{}/search", server.uri()), false);
    let async_output = tool.search("cute panda").await;

    let (tool, blocking_output) = tokio::task::spawn_blocking(move || {
        let output = tool.search_blocking("cute panda");
        (tool, output)
    })
    .await
    .unwrap();

    assert_eq!(async_output, blocking_output);
    assert_eq!(tool.name(), "web_search");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), requests[1].url.query());
}

#[tokio::test]
async fn test_unreachable_backend_never_panics() {
    let tool = searxng_tool(UNREACHABLE_URL, true);
    let output = tool.search("cute panda").await;

    assert!(!output.is_ok());
    assert!(output.records().is_empty());
    assert_eq!(output.raw, json!({}));
    assert!(matches!(
        output.failure_kind(),
        Some(ErrorKind::Transport) | Some(ErrorKind::Timeout)
    ));
    assert_eq!(output.to_json()["raw"], json!({}));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unreachable_backend_blocking_never_panics() {
    let output = tokio::task::spawn_blocking(|| {
        searxng_tool(UNREACHABLE_URL, false).search_blocking("cute panda")
    })
    .await
    .unwrap();

    assert!(!output.is_ok());
    assert_eq!(output.raw, json!({}));
}

#[tokio::test]
async fn test_backend_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let output = searxng_tool(&format!("{}/search", server.uri()), false)
        .search("cute panda")
        .await;

    assert_eq!(output.failure_kind(), Some(ErrorKind::Status));
    let value = output.to_json();
    assert_eq!(value["error"]["message"], "Error 500: Internal Server Error");
    assert_eq!(value["raw"], json!({}));
}

#[tokio::test]
async fn test_missing_base_url_is_configuration_failure() {
    let config = SearchConfig {
        engine: SearchEngine::Searxng,
        ..SearchConfig::default()
    };
    let output = WebSearchTool::from_config(&config)
        .unwrap()
        .search("cute panda")
        .await;

    assert_eq!(output.failure_kind(), Some(ErrorKind::Configuration));
    assert_eq!(output.raw, json!({}));
}

#[tokio::test]
async fn test_empty_query_is_invalid_query_failure() {
    let output = searxng_tool(UNREACHABLE_URL, false).search("   ").await;
    assert_eq!(output.failure_kind(), Some(ErrorKind::InvalidQuery));
}
