use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub enum Role {
    #[serde(rename = "system")]
    System,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "user")]
    User,
}

/// A single entry in the `messages` array of a chat completion
/// request.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Self {
        Message {
            role,
            content: content.to_string(),
        }
    }
}

/// Sampling settings sent along with every completion request.
#[derive(Clone, Debug)]
pub struct CompletionOptions {
    pub temperature: f64,
    pub max_tokens: u32,
}

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("upstream request failed: {0}")]
    Upstream(String),
    #[error("malformed completion response: {0}")]
    MalformedResponse(String),
}

const GENERIC_UPSTREAM_ERROR: &str = "Chat completion request failed";

// Error bodies from OpenAI compatible APIs look like
// {"error": {"message": "...", "type": "...", "code": "..."}}
// but some proxies flatten it to {"error": "..."}
fn upstream_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let error = value.get("error")?;
    error
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| error.as_str())
        .map(str::to_string)
}

/// Request a single, non-streaming completion and return the text of
/// the first choice. One attempt only.
pub async fn completion(
    messages: &[Message],
    api_hostname: &str,
    api_key: &str,
    model: &str,
    options: &CompletionOptions,
) -> Result<String, CompletionError> {
    let payload = json!({
        "model": model,
        "messages": messages,
        "temperature": options.temperature,
        "max_tokens": options.max_tokens,
    });
    let url = format!("{}/v1/chat/completions", api_hostname.trim_end_matches("/"));
    let response = reqwest::Client::new()
        .post(url)
        .bearer_auth(api_key)
        .header("Content-Type", "application/json")
        .timeout(Duration::from_secs(60))
        .json(&payload)
        .send()
        .await
        .map_err(|e| CompletionError::Upstream(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| CompletionError::Upstream(e.to_string()))?;

    if !status.is_success() {
        tracing::warn!("Completion request returned {}: {}", status, body);
        let message =
            upstream_error_message(&body).unwrap_or_else(|| GENERIC_UPSTREAM_ERROR.to_string());
        return Err(CompletionError::Upstream(message));
    }

    let resp: Value = serde_json::from_str(&body)
        .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;

    resp["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| CompletionError::MalformedResponse(format!("No message received: {}", resp)))
}
