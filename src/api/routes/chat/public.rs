//! Public types for the chat API
use serde::{Deserialize, Serialize};

use crate::chat::ChatMessage;
use crate::core::Location;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ChatRequest {
    pub message: String,
    // The trailing window of the conversation, oldest first
    #[serde(default)]
    pub history: Vec<ChatMessage>,
    // Falls back to the server's configured location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

pub type ChatResponse = ChatMessage;
