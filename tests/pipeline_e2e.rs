//! Full pipeline against mock remotes.
//!
//! The production pipeline is built from config, with the search provider,
//! the result pages, and the completion provider all served by one
//! `wiremock` instance.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use serde_json::{Value, json};
use webqa::config::ServerConfig;
use webqa::{FALLBACK_ANSWER, QueryPipeline, QueryServer, Secrets, WebqaConfig, WebqaError};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PARIS_PAGE: &str = r#"<html>
<head><title>Paris</title><style>p { color: red }</style></head>
<body>
  <nav><a href="/">Home</a></nav>
  <h1>Paris</h1>
  <p>Paris is the capital of France.</p>
  <script>track()</script>
  <footer>Footer links</footer>
</body>
</html>"#;

fn config_for(server: &MockServer) -> WebqaConfig {
    let mut config = WebqaConfig::default();
    config.search.endpoint = format!("{}/search", server.uri());
    config.llm.base_url = server.uri();
    config
}

fn secrets() -> Secrets {
    Secrets {
        search_api_key: Some("serper-key".into()),
        llm_api_key: Some("openai-key".into()),
    }
}

async fn mount_search(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(header("X-API-KEY", "serper-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "organic": [
                {"title": "Paris - Wikipedia", "link": format!("{}/paris", server.uri())},
                {"title": "Missing page", "link": format!("{}/missing", server.uri())},
                {"title": "Never scanned", "link": format!("{}/third", server.uri())}
            ]
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/paris"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(PARIS_PAGE, "text/html"))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/third"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(PARIS_PAGE, "text/html"))
        .expect(0)
        .mount(server)
        .await;
}

async fn completion_prompt(server: &MockServer) -> String {
    let received = server.received_requests().await.unwrap();
    let completion = received
        .iter()
        .find(|r| r.url.path() == "/v1/chat/completions")
        .expect("completion request was sent");
    let body: Value = serde_json::from_slice(&completion.body).unwrap();
    body["messages"][1]["content"].as_str().unwrap().to_owned()
}

#[tokio::test]
async fn answers_from_scraped_sources() {
    let server = MockServer::start().await;
    mount_search(&server).await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer openai-key"))
        .and(body_partial_json(json!({"model": "gpt-3.5-turbo"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "Paris."}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let pipeline = QueryPipeline::from_config(&config_for(&server), &secrets()).unwrap();
    let answer = pipeline.handle("capital of France").await.unwrap();
    assert_eq!(answer, "Paris.");

    let prompt = completion_prompt(&server).await;
    assert!(prompt.contains(
        "\n\n=== Paris - Wikipedia ===\nParis\n\nParis is the capital of France.\n"
    ));
    assert!(!prompt.contains("Missing page"));
    assert!(!prompt.contains("track()"));
    assert!(!prompt.contains("Footer links"));
    assert!(!prompt.contains("Home"));
    assert!(prompt.ends_with("Query: capital of France"));
}

#[tokio::test]
async fn completion_failure_still_answers() {
    let server = MockServer::start().await;
    mount_search(&server).await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "Incorrect API key provided"}
        })))
        .mount(&server)
        .await;

    let pipeline = QueryPipeline::from_config(&config_for(&server), &secrets()).unwrap();
    let answer = pipeline.handle("capital of France").await.unwrap();
    assert_eq!(answer, FALLBACK_ANSWER);
}

#[tokio::test]
async fn search_provider_failure_fails_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let pipeline = QueryPipeline::from_config(&config_for(&server), &secrets()).unwrap();
    let err = pipeline.handle("capital of France").await.unwrap_err();
    assert!(matches!(err, WebqaError::Search(_)));
}

#[tokio::test]
async fn no_results_sends_empty_content() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"searchParameters": {}})))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": "I could not find anything."}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let pipeline = QueryPipeline::from_config(&config_for(&server), &secrets()).unwrap();
    let answer = pipeline.handle("zzqx").await.unwrap();
    assert_eq!(answer, "I could not find anything.");

    let prompt = completion_prompt(&server).await;
    assert!(prompt.contains("--- Content Start ---\n\n--- Content End ---"));
}

#[tokio::test]
async fn served_over_http() {
    let server = MockServer::start().await;
    mount_search(&server).await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": "Paris is the capital of France."}}]
        })))
        .mount(&server)
        .await;

    let pipeline = QueryPipeline::from_config(&config_for(&server), &secrets()).unwrap();
    let listen = ServerConfig {
        host: "127.0.0.1".into(),
        port: 0,
    };
    let app = QueryServer::start(Arc::new(pipeline), &listen).await.unwrap();

    let response = reqwest::Client::new()
        .post(format!("http://{}/query", app.addr()))
        .json(&json!({"query": "capital of France"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"answer": "Paris is the capital of France."}));
}
