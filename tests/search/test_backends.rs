// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use serde_json::json;
use std::time::Duration;
use web_search_tools::search::arxiv::ArxivProvider;
use web_search_tools::search::brave::BraveSearchProvider;
use web_search_tools::search::duckduckgo::DuckDuckGoProvider;
use web_search_tools::search::tavily::TavilySearchProvider;
use web_search_tools::search::{SearchError, SearchProvider, SearchRecord};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::test]
async fn test_tavily_posts_query_and_flattens_images() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(header("authorization", "Bearer tvly-key"))
        .and(body_partial_json(json!({
            "query": "cute panda",
            "max_results": 2,
            "include_images": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"title": "Panda", "url": "https://example.org/panda", "content": "A bear", "score": 0.9}
            ],
            "images": [
                {"url": "https://img.example.org/a.jpg", "description": "Panda on a tree"},
                "https://img.example.org/b.jpg"
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = TavilySearchProvider::new("tvly-key".to_string(), true, TIMEOUT)
        .unwrap()
        .with_endpoint(format!("{}/search", server.uri()));
    let response = provider.search("cute panda", 2).await.unwrap();

    assert_eq!(response.provider, "tavily");
    assert_eq!(response.result_count(), 3);
    match &response.records[1] {
        SearchRecord::Image(image) => {
            assert_eq!(image.image_url, "https://img.example.org/a.jpg");
            assert_eq!(image.image_description, "Panda on a tree");
        }
        other => panic!("expected image, got {:?}", other),
    }
}

#[tokio::test]
async fn test_tavily_rejected_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let provider = TavilySearchProvider::new("bad".to_string(), false, TIMEOUT)
        .unwrap()
        .with_endpoint(server.uri());
    let err = provider.search("panda", 3).await.unwrap_err();
    assert!(matches!(err, SearchError::NoApiKey { .. }));
}

#[tokio::test]
async fn test_brave_sends_token_and_caps_count() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("x-subscription-token", "brave-key"))
        .and(query_param("q", "rust async"))
        .and(query_param("count", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "web": {
                "results": [
                    {"title": "Tokio", "url": "https://tokio.rs", "description": "Async runtime"}
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = BraveSearchProvider::new("brave-key".to_string(), TIMEOUT)
        .unwrap()
        .with_endpoint(server.uri());
    let response = provider.search("rust async", 50).await.unwrap();

    assert_eq!(response.result_count(), 1);
    assert_eq!(response.records[0].engine(), "brave");
}

#[tokio::test]
async fn test_brave_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let provider = BraveSearchProvider::new("brave-key".to_string(), TIMEOUT)
        .unwrap()
        .with_endpoint(server.uri());
    let err = provider.search("rust", 3).await.unwrap_err();
    assert!(matches!(err, SearchError::RateLimited { .. }));
}

#[tokio::test]
async fn test_duckduckgo_parses_html_results() {
    let html = r##"<html><body>
        <div class="result results_links web-result">
          <h2 class="result__title">
            <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fwww.rust-lang.org%2F&amp;rut=abc">Rust Programming Language</a>
          </h2>
          <a class="result__snippet" href="#">A language empowering everyone.</a>
        </div>
      </body></html>"##;

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(&server)
        .await;

    let provider = DuckDuckGoProvider::new(TIMEOUT)
        .unwrap()
        .with_endpoint(server.uri());
    let response = provider.search("rust", 5).await.unwrap();

    assert_eq!(response.result_count(), 1);
    match &response.records[0] {
        SearchRecord::Page(page) => {
            assert_eq!(page.url, "https://www.rust-lang.org/");
            assert_eq!(page.title, "Rust Programming Language");
            assert_eq!(page.content, "A language empowering everyone.");
        }
        other => panic!("expected page, got {:?}", other),
    }
    assert_eq!(response.raw["results"][0]["url"], "https://www.rust-lang.org/");
}

#[tokio::test]
async fn test_arxiv_queries_all_fields() {
    let feed = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <entry>
    <id>http://arxiv.org/abs/1706.03762v7</id>
    <published>2017-06-12T17:57:34Z</published>
    <title>Attention Is All You Need</title>
    <summary>The dominant sequence transduction models.</summary>
    <author><name>Ashish Vaswani</name></author>
  </entry>
</feed>"#;

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("search_query", "all:attention"))
        .and(query_param("start", "0"))
        .and(query_param("max_results", "3"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/atom+xml")
                .set_body_string(feed),
        )
        .expect(1)
        .mount(&server)
        .await;

    let provider = ArxivProvider::new(TIMEOUT)
        .unwrap()
        .with_endpoint(server.uri());
    let response = provider.search("attention", 3).await.unwrap();

    assert_eq!(response.result_count(), 1);
    match &response.records[0] {
        SearchRecord::Page(page) => {
            assert_eq!(page.title, "Attention Is All You Need");
            assert_eq!(page.published_date.as_deref(), Some("2017-06-12T17:57:34Z"));
        }
        other => panic!("expected page, got {:?}", other),
    }
    assert_eq!(response.raw["entries"][0]["authors"][0], "Ashish Vaswani");
}
