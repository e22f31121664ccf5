//! Messages as the widget sees them. The model provider's role
//! vocabulary lives in `crate::openai`.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::openai::{Message, Role};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum Sender {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "bot")]
    Bot,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Sender> for Role {
    fn from(sender: Sender) -> Role {
        match sender {
            Sender::User => Role::User,
            Sender::Bot => Role::Assistant,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct ChatMessage {
    pub role: Sender,
    pub content: String,
    // Quick replies offered alongside a bot message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl ChatMessage {
    pub fn user(content: &str) -> Self {
        Self {
            role: Sender::User,
            content: content.to_string(),
            options: None,
        }
    }

    pub fn bot(content: &str, options: Vec<String>) -> Self {
        Self {
            role: Sender::Bot,
            content: content.to_string(),
            options: Some(options),
        }
    }
}

/// Quick reply options never reach the model.
impl From<&ChatMessage> for Message {
    fn from(msg: &ChatMessage) -> Message {
        Message::new(msg.role.into(), &msg.content)
    }
}

/// The record written to the message store. User messages carry the
/// id of the signed in user, bot messages don't.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct NewMessage {
    pub content: String,
    pub role: Sender,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl NewMessage {
    pub fn from_user(content: &str, user_id: &str) -> Self {
        Self {
            content: content.to_string(),
            role: Sender::User,
            user_id: Some(user_id.to_string()),
        }
    }

    pub fn from_bot(content: &str) -> Self {
        Self {
            content: content.to_string(),
            role: Sender::Bot,
            user_id: None,
        }
    }
}
