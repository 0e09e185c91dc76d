//! Shared helpers for reformulation-service integration tests.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use reformulation_service::config::{OpenAiConfig, ReformulationConfig};
use reformulation_service::services::providers::mock::MockTextProvider;
use reformulation_service::services::providers::unavailable::UnavailableProvider;
use reformulation_service::services::TextProvider;
use reformulation_service::{build_router, AppState};
use service_core::config::Config;
use std::sync::Arc;
use tower::util::ServiceExt;

pub const VALID_OUTPUT: &str = r#"{"pregunta_reformulada": "¿Cuál es tu nombre completo?", "explicacion_breve": "Se precisó el término nombre."}"#;

/// Configuration bound to a random local port, never reading the environment.
pub fn test_config(api_key: Option<&str>) -> ReformulationConfig {
    ReformulationConfig {
        common: Config {
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
        },
        environment: "test".to_string(),
        log_level: "error".to_string(),
        otlp_endpoint: None,
        openai: OpenAiConfig {
            api_key: api_key.map(str::to_string),
            model: "gpt-4.1-mini".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
        },
    }
}

pub fn router_with(provider: Arc<dyn TextProvider>) -> Router {
    build_router(AppState {
        config: test_config(Some("sk-test")),
        text_provider: provider,
    })
}

pub fn mock_router(provider: Arc<MockTextProvider>) -> Router {
    router_with(provider)
}

pub fn unavailable_router() -> Router {
    router_with(Arc::new(UnavailableProvider::new("OPENAI_API_KEY is not set")))
}

/// POST a raw body to `/reformular` and return the status and parsed JSON.
pub async fn post_reformular(app: Router, body: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/reformular")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}
