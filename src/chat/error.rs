use thiserror::Error;

use crate::openai::CompletionError;

pub const GENERIC_FAILURE_NOTICE: &str = "Failed to get response. Please try again.";
pub const SIGN_IN_NOTICE: &str = "Please sign in to chat with Nova.";

/// Everything that can end a turn early.
#[derive(Debug, Error)]
pub enum TurnError {
    #[error("message is empty")]
    EmptyMessage,
    #[error("a message is already being sent")]
    Busy,
    #[error("no authenticated session")]
    AuthRequired,
    #[error("failed to persist message: {0}")]
    Persistence(String),
    #[error("upstream error: {0}")]
    Upstream(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("failed to render prompt: {0}")]
    Prompt(String),
}

impl TurnError {
    /// The text shown to the user for this error, if any. Upstream
    /// details are never part of it.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            TurnError::EmptyMessage | TurnError::Busy => None,
            TurnError::AuthRequired => Some(SIGN_IN_NOTICE),
            TurnError::Persistence(_)
            | TurnError::Upstream(_)
            | TurnError::MalformedResponse(_)
            | TurnError::Prompt(_) => Some(GENERIC_FAILURE_NOTICE),
        }
    }
}

impl From<CompletionError> for TurnError {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::Upstream(msg) => TurnError::Upstream(msg),
            CompletionError::MalformedResponse(msg) => TurnError::MalformedResponse(msg),
        }
    }
}
