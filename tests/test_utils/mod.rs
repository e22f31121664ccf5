//! Test utilities for integration tests
#![allow(dead_code)]

use std::sync::Arc;

use axum::{Router, body::Body};

use nova::api::AppState;
use nova::api::app;
use nova::core::{AppConfig, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, Location};

/// Creates a test application router that sends completion requests
/// to `openai_api_hostname`, usually a `mockito` server.
pub fn test_app(openai_api_hostname: &str) -> Router {
    let app_config = AppConfig {
        storage_path: String::from("./"),
        db_path: String::from("./db"),
        openai_model: String::from("gpt-4o-mini"),
        openai_api_hostname: openai_api_hostname.to_string(),
        openai_api_key: String::from("test-api-key"),
        temperature: DEFAULT_TEMPERATURE,
        max_tokens: DEFAULT_MAX_TOKENS,
        location: Location::default(),
    };
    let app_state = AppState::new(app_config);
    app(Arc::new(app_state))
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not utf-8")
}

pub fn completion_body(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1694268190,
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": content
            },
            "finish_reason": "stop"
        }]
    })
    .to_string()
}
