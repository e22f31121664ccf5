use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::ai::{ModelSettings, respond};
use crate::api::public::chat::ChatRequest;
use crate::chat::{ChatMessage, Sender, TurnError};
use crate::core::Location;

/// Whatever turns a user message into a bot reply.
#[async_trait]
pub trait ReplyBackend: Send + Sync {
    async fn reply(&self, request: &ChatRequest) -> Result<ChatMessage, TurnError>;
}

/// Calls a running chat handler over HTTP.
pub struct HttpReplyBackend {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl HttpReplyBackend {
    pub fn new(base_url: &str, api_key: Option<&str>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(str::to_string),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ReplyBackend for HttpReplyBackend {
    async fn reply(&self, request: &ChatRequest) -> Result<ChatMessage, TurnError> {
        let url = format!("{}/api/chat", self.base_url);
        let mut req = self
            .client
            .post(url)
            .timeout(Duration::from_secs(90))
            .json(request);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let response = req
            .send()
            .await
            .map_err(|e| TurnError::Upstream(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TurnError::Upstream(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v["error"].as_str().map(str::to_string))
                .unwrap_or_else(|| format!("Chat handler returned {}", status));
            return Err(TurnError::Upstream(message));
        }

        let reply: ChatMessage = serde_json::from_str(&body)
            .map_err(|e| TurnError::MalformedResponse(e.to_string()))?;
        if reply.role != Sender::Bot {
            return Err(TurnError::MalformedResponse(format!(
                "Expected a bot message, got {}",
                reply.role
            )));
        }

        Ok(reply)
    }
}

/// Runs the chat handler logic in process.
pub struct DirectReplyBackend {
    settings: ModelSettings,
    location: Location,
}

impl DirectReplyBackend {
    pub fn new(settings: ModelSettings, location: Location) -> Self {
        Self { settings, location }
    }
}

#[async_trait]
impl ReplyBackend for DirectReplyBackend {
    async fn reply(&self, request: &ChatRequest) -> Result<ChatMessage, TurnError> {
        let location = request.location.as_ref().unwrap_or(&self.location);
        respond(&self.settings, location, &request.history, &request.message).await
    }
}
