// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use serde_json::json;
use web_search_tools::search::searxng::normalize;
use web_search_tools::search::{SearchError, SearchRecord, SearxngRequest};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::common::{searxng_client, searxng_document, UNREACHABLE_URL};

#[tokio::test]
async fn test_raw_results_sends_expected_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "cute panda"))
        .and(query_param("format", "json"))
        .and(query_param("pageno", "1"))
        .and(query_param("count", "5"))
        .and(query_param("language", "all"))
        .and(query_param("engines", "qwant images,duckduckgo images,bing images"))
        .respond_with(ResponseTemplate::new(200).set_body_json(searxng_document()))
        .expect(1)
        .mount(&server)
        .await;

    let client = searxng_client(&format!("{}/search", server.uri()));
    let request = client.request("cute panda").include_images(true);
    let raw = client.raw_results(&request).await.unwrap();

    assert_eq!(raw, searxng_document());
}

#[tokio::test]
async fn test_raw_results_without_images_omits_engines() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .mount(&server)
        .await;

    let client = searxng_client(&format!("{}/search", server.uri()));
    let request = client.request("rust").max_results(3);
    client.raw_results(&request).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let query = requests[0].url.query().unwrap_or_default();
    assert_eq!(query, "q=rust&format=json&pageno=1&count=3&language=all");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_blocking_and_async_send_identical_queries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(searxng_document()))
        .expect(2)
        .mount(&server)
        .await;

    let client = searxng_client(&format!("{}/search", server.uri()));
    let request = SearxngRequest::new("cute panda")
        .max_results(7)
        .language("en")
        .categories(["general", "images"])
        .engines(["google"])
        .include_images(true);

    let async_raw = client.raw_results(&request).await.unwrap();

    let blocking_client = client.clone();
    let blocking_request = request.clone();
    let blocking_raw = tokio::task::spawn_blocking(move || {
        blocking_client.raw_results_blocking(&blocking_request)
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(async_raw, blocking_raw);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].url.query(), requests[1].url.query());

    // An explicit engine list is left alone under the default policy
    let pairs: Vec<(String, String)> = requests[0]
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert!(pairs.contains(&("engines".to_string(), "google".to_string())));
    assert!(pairs.contains(&("categories".to_string(), "general,images".to_string())));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_non_success_status_on_both_paths() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = searxng_client(&format!("{}/search", server.uri()));
    let request = client.request("panda");

    let err = client.raw_results(&request).await.unwrap_err();
    assert!(matches!(err, SearchError::Status { status: 503, .. }));
    assert_eq!(err.to_string(), "Error 503: Service Unavailable");

    let blocking_client = client.clone();
    let err = tokio::task::spawn_blocking(move || blocking_client.raw_results_blocking(&request))
        .await
        .unwrap()
        .unwrap_err();
    assert!(matches!(err, SearchError::Status { status: 503, .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_invalid_json_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = searxng_client(&format!("{}/search", server.uri()));
    let request = client.request("panda");

    let err = client.raw_results(&request).await.unwrap_err();
    assert!(matches!(err, SearchError::Parse { .. }));

    let blocking_client = client.clone();
    let err = tokio::task::spawn_blocking(move || blocking_client.raw_results_blocking(&request))
        .await
        .unwrap()
        .unwrap_err();
    assert!(matches!(err, SearchError::Parse { .. }));
}

#[tokio::test]
async fn test_unreachable_instance_is_transport_error() {
    let client = searxng_client(UNREACHABLE_URL);
    let err = client.raw_results(&client.request("panda")).await.unwrap_err();
    assert!(err.is_backend_failure());
    assert!(matches!(
        err,
        SearchError::Transport { .. } | SearchError::Timeout { .. }
    ));
}

#[tokio::test]
async fn test_fetched_document_normalizes_pages_then_images() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(searxng_document()))
        .mount(&server)
        .await;

    let client = searxng_client(&format!("{}/search", server.uri()));
    let raw = client.raw_results(&client.request("cute panda")).await.unwrap();
    let records = normalize(&raw);

    assert_eq!(records.len(), 3);
    assert!(records[0].is_page());
    assert!(records[1].is_page());
    match &records[2] {
        SearchRecord::Image(image) => {
            assert_eq!(image.image_url, "https://img.example.org/panda.jpg");
            assert_eq!(image.image_description, "Panda eating bamboo");
            assert_eq!(image.source_url, "https://example.org/gallery");
            assert_eq!(image.engine, "bing images");
        }
        other => panic!("expected image, got {:?}", other),
    }
}
