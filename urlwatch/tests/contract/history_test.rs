//! Contract Test: GET /history

use crate::support::app::{create_test_app, get};
use axum::http::StatusCode;
use chrono::Duration;
use serde_json::json;
use urlwatch::db::ObservationRepository;
use urlwatch::types::{timestamp, CheckStatus, DownReason, Observation};

#[tokio::test]
async fn history_empty_store() {
    let (app, _) = create_test_app().await;
    let (status, body) = get(&app, "/history").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn history_is_newest_first_across_urls() {
    let (app, state) = create_test_app().await;
    let base = timestamp::now() - Duration::minutes(10);

    let rows = [
        ("https://a.example", CheckStatus::Up, Some(12.5), 1),
        ("https://b.example", CheckStatus::Down(DownReason::Timeout), None, 2),
        ("https://a.example", CheckStatus::Down(DownReason::HttpStatus(404)), Some(3.0), 3),
    ];
    for (url, status, rt, minute) in rows {
        state
            .observations
            .append(&Observation {
                url: url.to_string(),
                status,
                response_time: rt,
                checked_at: base + Duration::minutes(minute),
            })
            .await
            .unwrap();
    }

    let (status, body) = get(&app, "/history").await;
    assert_eq!(status, StatusCode::OK);

    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["url"], "https://a.example");
    assert_eq!(entries[0]["status"], "DOWN (404)");
    assert_eq!(entries[1]["status"], "DOWN (Timeout)");
    assert!(entries[1]["response_time"].is_null());
    assert_eq!(entries[2]["status"], "UP");
    assert_eq!(entries[2]["response_time"], 12.5);
    assert!(entries[0].get("response_time_anomaly").is_none());
}

#[tokio::test]
async fn history_limit_and_default() {
    let (app, state) = create_test_app().await;
    let base = timestamp::now() - Duration::hours(1);
    for i in 0..105 {
        state
            .observations
            .append(&Observation {
                url: "https://a.example".to_string(),
                status: CheckStatus::Up,
                response_time: Some(1.0),
                checked_at: base + Duration::seconds(i),
            })
            .await
            .unwrap();
    }

    let (_, body) = get(&app, "/history").await;
    assert_eq!(body.as_array().unwrap().len(), 100);

    let (_, body) = get(&app, "/history?limit=3").await;
    assert_eq!(body.as_array().unwrap().len(), 3);

    for uri in ["/history?limit=abc", "/history?limit=-1"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid request"}));
    }
}
