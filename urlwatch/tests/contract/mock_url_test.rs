//! Contract Test: GET /mock-url, POST /toggle-mock-url

use crate::support::app::{create_test_app, get, send};
use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn mock_url_toggles_between_up_and_down() {
    let (app, _) = create_test_app().await;

    let (status, body) = get(&app, "/mock-url").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "✅ Mock service is UP"}));

    let (status, body) = send(&app, Method::POST, "/toggle-mock-url", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"new_status": "DOWN"}));

    let (status, body) = get(&app, "/mock-url").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "💥 Mock service is DOWN"}));

    let (_, body) = send(&app, Method::POST, "/toggle-mock-url", None).await;
    assert_eq!(body, json!({"new_status": "UP"}));
}

#[tokio::test]
async fn mock_state_is_per_app_state() {
    let (first, _) = create_test_app().await;
    let (second, _) = create_test_app().await;

    send(&first, Method::POST, "/toggle-mock-url", None).await;

    let (status, _) = get(&second, "/mock-url").await;
    assert_eq!(status, StatusCode::OK);
}
