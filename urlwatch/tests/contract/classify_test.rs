//! Contract Test: POST /classify

use crate::support::app::{create_test_state, post_json};
use axum::http::StatusCode;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use urlwatch::api;
use urlwatch::classify::HuggingFaceClassifier;
use urlwatch::config::ClassifierConfig;
use wiremock::matchers::{header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn classify_without_token_degrades_to_unknown() {
    let app = api::create_app(create_test_state().await);

    let (status, body) = post_json(
        &app,
        "/classify",
        json!({"urls": ["https://news.example", "https://shop.example"]}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"url": "https://news.example", "category": "unknown"},
            {"url": "https://shop.example", "category": "unknown"}
        ])
    );
}

#[tokio::test]
async fn classify_uses_top_label() {
    let inference = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("authorization", "Bearer hf_contract"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "labels": ["sports", "news"],
            "scores": [0.8, 0.2]
        })))
        .mount(&inference)
        .await;

    let mut state = create_test_state().await;
    state.classifier = Arc::new(
        HuggingFaceClassifier::new(&ClassifierConfig {
            api_url: inference.uri(),
            api_token: Some("hf_contract".to_string()),
            timeout: Duration::from_secs(2),
        })
        .unwrap(),
    );
    let app = api::create_app(state);

    let (status, body) =
        post_json(&app, "/classify", json!({"urls": ["https://scores.example"]})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["category"], "sports");
}

#[tokio::test]
async fn classify_rejects_invalid_url() {
    let app = api::create_app(create_test_state().await);
    let (status, body) = post_json(&app, "/classify", json!({"urls": ["nope"]})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
