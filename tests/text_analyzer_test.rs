//! Integration tests for the HTTP text analyzer against a mock analysis API.

use assert_matches::assert_matches;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use eventforge::config::TextAnalysisConfig;
use eventforge::services::{HttpTextAnalyzer, TextAnalyzer};
use eventforge::EventForgeError;

fn analyzer_for(server: &MockServer) -> HttpTextAnalyzer {
    HttpTextAnalyzer::new(TextAnalysisConfig {
        api_url: server.uri(),
        timeout_seconds: 5,
    })
    .unwrap()
}

#[tokio::test]
async fn test_extract_keywords_posts_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/keywords"))
        .and(body_json(json!({ "text": "Harvest Fair。All welcome" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "keywords": ["harvest", "fair", "welcome"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let analyzer = analyzer_for(&server);
    let keywords = analyzer
        .extract_keywords("Harvest Fair。All welcome")
        .await
        .unwrap();
    assert_eq!(keywords, vec!["harvest", "fair", "welcome"]);
}

#[tokio::test]
async fn test_tokenize_posts_phrase() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tokenize"))
        .and(body_json(json!({ "text": "autumn festival" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "tokens": ["autumn", "festival"] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let analyzer = analyzer_for(&server);
    let tokens = analyzer.tokenize("autumn festival").await.unwrap();
    assert_eq!(tokens, vec!["autumn", "festival"]);
}

#[tokio::test]
async fn test_non_success_status_is_an_analysis_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/keywords"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let analyzer = analyzer_for(&server);
    let result = analyzer.extract_keywords("anything").await;
    assert_matches!(result, Err(EventForgeError::TextAnalysis(message)) => {
        assert!(message.contains("500"));
    });
}

#[tokio::test]
async fn test_empty_token_list_passes_through() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tokenize"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "tokens": [] })))
        .mount(&server)
        .await;

    let analyzer = analyzer_for(&server);
    let tokens = analyzer.tokenize("").await.unwrap();
    assert!(tokens.is_empty());
}
