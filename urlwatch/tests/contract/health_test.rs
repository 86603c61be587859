//! Contract Test: GET /health

use crate::support::app::{create_test_app, get};
use axum::http::StatusCode;
use serde_json::json;
use urlwatch::db::ObservationRepository;
use urlwatch::types::{CheckStatus, DownReason, Observation};

#[tokio::test]
async fn health_with_no_urls() {
    let (app, _) = create_test_app().await;
    let (status, body) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "total_monitored": 0,
            "current_up": 0,
            "current_down": 0,
            "average_uptime_last_24h": null
        })
    );
}

#[tokio::test]
async fn health_counts_latest_status() {
    let (app, state) = create_test_app().await;
    for (url, status) in [
        ("https://a.example", CheckStatus::Up),
        ("https://b.example", CheckStatus::Up),
        ("https://c.example", CheckStatus::Down(DownReason::ConnectionError)),
    ] {
        state
            .observations
            .append(&Observation::new(url, status, None))
            .await
            .unwrap();
    }

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_monitored"], 3);
    assert_eq!(body["current_up"], 2);
    assert_eq!(body["current_down"], 1);

    let average = body["average_uptime_last_24h"].as_f64().unwrap();
    assert!((average - 200.0 / 3.0).abs() < 1e-9);
}
