//! Integration Test: 監視フロー全体
//!
//! 実ポートで起動したサーバー自身の `/mock-url` を監視対象にし、
//! 切り替え → チェック → 集計の流れを確認する。

use crate::support::app::create_test_state;
use crate::support::http::spawn_app;
use reqwest::Client;
use serde_json::{json, Value};
use urlwatch::api;

async fn check(client: &Client, base: &str, url: &str) -> Value {
    let body: Value = client
        .post(format!("{}/check", base))
        .json(&json!({"urls": [url]}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    body[0].clone()
}

async fn toggle(client: &Client, base: &str) -> String {
    let body: Value = client
        .post(format!("{}/toggle-mock-url", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    body["new_status"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn mock_target_flow_detects_downtime_and_flapping() {
    let server = spawn_app(api::create_app(create_test_state().await)).await;
    let base = server.base_url();
    let target = format!("{}/mock-url", base);
    let client = Client::new();

    // UP
    let first = check(&client, &base, &target).await;
    assert_eq!(first["status"], "UP");
    assert_eq!(first["response_time_anomaly"], false);

    // DOWN
    assert_eq!(toggle(&client, &base).await, "DOWN");
    let second = check(&client, &base, &target).await;
    assert_eq!(second["status"], "DOWN (500)");
    assert_eq!(second["response_time_anomaly"], false);

    // UP
    assert_eq!(toggle(&client, &base).await, "UP");
    let third = check(&client, &base, &target).await;
    assert_eq!(third["status"], "UP");
    assert_eq!(third["response_time_anomaly"], false);

    // DOWN: 3回目の切り替わりでフラップ判定
    assert_eq!(toggle(&client, &base).await, "DOWN");
    let fourth = check(&client, &base, &target).await;
    assert_eq!(fourth["status"], "DOWN (500)");
    assert_eq!(fourth["response_time_anomaly"], true);

    let downtime: Value = client
        .get(format!("{}/recent_downtime", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        downtime,
        json!([{"url": target, "down_since": fourth["checked_at"]}])
    );

    let health: Value = client
        .get(format!("{}/health", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["total_monitored"], 1);
    assert_eq!(health["current_up"], 0);
    assert_eq!(health["current_down"], 1);
    assert_eq!(health["average_uptime_last_24h"], 50.0);

    let history: Value = client
        .get(format!("{}/history?limit=2", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let history = history.as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["checked_at"], fourth["checked_at"]);
    assert_eq!(history[1]["checked_at"], third["checked_at"]);

    server.stop().await;
}
