//! Integration tests that run the full server on a random port.

mod common;

use common::test_config;
use reformulation_service::startup::Application;
use reqwest::Client;
use std::time::Duration;

/// Spawn the application on a random port and return the port number.
async fn spawn_app(api_key: Option<&str>) -> u16 {
    let app = Application::build(test_config(api_key))
        .await
        .expect("Failed to build application");

    let port = app.port();

    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    port
}

#[tokio::test]
async fn health_check_returns_ok() {
    let port = spawn_app(None).await;
    let client = Client::new();

    let response = client
        .get(format!("http://127.0.0.1:{}/health", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    assert!(response.headers().contains_key("x-request-id"));

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "reformulation-service");
}

#[tokio::test]
async fn readiness_fails_without_api_key() {
    let port = spawn_app(None).await;

    let response = Client::new()
        .get(format!("http://127.0.0.1:{}/ready", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 503);
}

#[tokio::test]
async fn readiness_ok_with_api_key() {
    let port = spawn_app(Some("sk-test")).await;

    let response = Client::new()
        .get(format!("http://127.0.0.1:{}/ready", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
}

#[tokio::test]
async fn missing_api_key_degrades_to_500() {
    let port = spawn_app(None).await;

    let response = Client::new()
        .post(format!("http://127.0.0.1:{}/reformular", port))
        .json(&serde_json::json!({ "pregunta": "qué es" }))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 500);
}

#[tokio::test]
async fn request_id_is_propagated() {
    let port = spawn_app(None).await;

    let response = Client::new()
        .get(format!("http://127.0.0.1:{}/health", port))
        .header("x-request-id", "trace-me")
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.headers()["x-request-id"], "trace-me");
}

#[tokio::test]
async fn metrics_endpoint_responds() {
    let port = spawn_app(None).await;

    let response = Client::new()
        .get(format!("http://127.0.0.1:{}/metrics", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
}
