//! Contract Test: GET /metrics/{url}

use crate::support::app::{create_test_app, get};
use axum::http::StatusCode;
use chrono::Duration;
use urlwatch::db::ObservationRepository;
use urlwatch::types::{timestamp, CheckStatus, DownReason, Observation};

async fn record(state: &urlwatch::AppState, url: &str, status: CheckStatus, age: Duration) {
    state
        .observations
        .append(&Observation {
            url: url.to_string(),
            status,
            response_time: None,
            checked_at: timestamp::now() - age,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn metrics_default_period_is_24h() {
    let (app, state) = create_test_app().await;
    record(&state, "https://example.com", CheckStatus::Up, Duration::hours(1)).await;

    let (status, body) = get(&app, "/metrics/https://example.com").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["url"], "https://example.com");
    assert_eq!(body["uptime_percentage"], 100.0);

    let start = timestamp::parse(body["period_start"].as_str().unwrap()).unwrap();
    let end = timestamp::parse(body["period_end"].as_str().unwrap()).unwrap();
    assert_eq!(end - start, Duration::hours(24));
}

#[tokio::test]
async fn metrics_period_selects_window() {
    let (app, state) = create_test_app().await;
    let url = "https://example.com/status";
    record(&state, url, CheckStatus::Down(DownReason::Timeout), Duration::days(5)).await;
    record(&state, url, CheckStatus::Up, Duration::hours(2)).await;

    let (_, day) = get(&app, "/metrics/https://example.com/status?period=24h").await;
    assert_eq!(day["uptime_percentage"], 100.0);

    let (_, week) = get(&app, "/metrics/https://example.com/status?period=7d").await;
    assert_eq!(week["uptime_percentage"], 50.0);
    assert_eq!(week["url"], url);

    let (_, month) = get(&app, "/metrics/https://example.com/status?period=30d").await;
    assert_eq!(month["uptime_percentage"], 50.0);
}

#[tokio::test]
async fn metrics_unknown_url_has_null_percentage() {
    let (app, _) = create_test_app().await;
    let (status, body) = get(&app, "/metrics/https://never.example?period=30d").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["uptime_percentage"].is_null());
}

#[tokio::test]
async fn metrics_invalid_period_is_400() {
    let (app, _) = create_test_app().await;
    let (status, body) = get(&app, "/metrics/https://example.com?period=1h").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Invalid period. Supported values: 24h, 7d, 30d"
    );
}

#[tokio::test]
async fn metrics_accepts_percent_encoded_url() {
    let (app, state) = create_test_app().await;
    let url = "https://example.com/search?q=1";
    record(&state, url, CheckStatus::Up, Duration::minutes(5)).await;

    let (status, body) = get(
        &app,
        "/metrics/https%3A%2F%2Fexample.com%2Fsearch%3Fq%3D1?period=24h",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["url"], url);
    assert_eq!(body["uptime_percentage"], 100.0);
}
