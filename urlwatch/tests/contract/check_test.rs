//! Contract Test: POST /check

use crate::support::app::{create_test_app, get, post_json};
use axum::http::StatusCode;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn check_returns_results_in_request_order() {
    let target = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&target)
        .await;
    Mock::given(method("GET"))
        .and(path("/fail"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&target)
        .await;

    let (app, _) = create_test_app().await;
    let ok = format!("{}/ok", target.uri());
    let fail = format!("{}/fail", target.uri());

    let (status, body) = post_json(&app, "/check", json!({"urls": [fail, ok]})).await;

    assert_eq!(status, StatusCode::OK);
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 2);

    assert_eq!(results[0]["url"], fail);
    assert_eq!(results[0]["status"], "DOWN (500)");
    assert_eq!(results[0]["response_time_anomaly"], false);
    assert!(results[0]["response_time"].is_number());

    assert_eq!(results[1]["url"], ok);
    assert_eq!(results[1]["status"], "UP");
    let checked_at = results[1]["checked_at"].as_str().unwrap();
    assert!(checked_at.ends_with('Z'));
    assert!(urlwatch::types::timestamp::parse(checked_at).is_ok());
}

#[tokio::test]
async fn check_unreachable_target_is_recorded_down() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let url = format!("http://127.0.0.1:{}/", port);

    let (app, _) = create_test_app().await;
    let (status, body) = post_json(&app, "/check", json!({"urls": [url]})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["status"], "DOWN (Connection Error)");
    assert!(body[0]["response_time"].is_null());

    let (_, history) = get(&app, "/history").await;
    assert_eq!(history.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn check_rejects_invalid_url_without_checking_anything() {
    let (app, _) = create_test_app().await;

    let (status, body) = post_json(
        &app,
        "/check",
        json!({"urls": ["https://example.com", "example.com"]}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (_, history) = get(&app, "/history").await;
    assert_eq!(history, json!([]));
}

#[tokio::test]
async fn check_empty_batch_returns_empty_list() {
    let (app, _) = create_test_app().await;
    let (status, body) = post_json(&app, "/check", json!({"urls": []})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn check_requires_urls_field() {
    let (app, _) = create_test_app().await;
    let (status, body) = post_json(&app, "/check", json!({"targets": []})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid request"}));
}
