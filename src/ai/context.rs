//! Assembles the message list sent to the model for a single turn.
use anyhow::{Error, Result};

use super::prompt::system_directive;
use crate::chat::ChatMessage;
use crate::core::Location;
use crate::openai::{Message, Role};

/// Builds the instruction sequence for the model: the system
/// directive, then the prior turns, then the new user message.
///
/// The directive is rendered once up front so `build` can't fail and
/// always returns the same output for the same input.
#[derive(Clone, Debug)]
pub struct ContextBuilder {
    system_message: String,
}

impl ContextBuilder {
    pub fn new(location: &Location) -> Result<Self, Error> {
        Ok(Self {
            system_message: system_directive(location)?,
        })
    }

    pub fn system_message(&self) -> &str {
        &self.system_message
    }

    /// History is expected to already be limited to the recent window
    /// by the caller. Nothing is dropped or deduplicated here.
    pub fn build(&self, history: &[ChatMessage], message: &str) -> Vec<Message> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(Message::new(Role::System, &self.system_message));
        messages.extend(history.iter().map(Message::from));
        messages.push(Message::new(Role::User, message));
        messages
    }
}
