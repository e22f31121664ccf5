use crate::chat::{ChatMessage, TurnError};
use crate::core::{AppConfig, Location};
use crate::openai::{CompletionOptions, completion};

use super::augment::augment;
use super::context::ContextBuilder;

/// Everything needed to reach the chat completion API.
#[derive(Clone, Debug)]
pub struct ModelSettings {
    pub api_hostname: String,
    pub api_key: String,
    pub model: String,
    pub options: CompletionOptions,
}

impl From<&AppConfig> for ModelSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            api_hostname: config.openai_api_hostname.clone(),
            api_key: config.openai_api_key.clone(),
            model: config.openai_model.clone(),
            options: CompletionOptions {
                temperature: config.temperature,
                max_tokens: config.max_tokens,
            },
        }
    }
}

/// Run one turn: build the context, make a single completion request
/// and attach quick reply options. Nothing is retried and no state is
/// kept between calls.
pub async fn respond(
    settings: &ModelSettings,
    location: &Location,
    history: &[ChatMessage],
    message: &str,
) -> Result<ChatMessage, TurnError> {
    let builder = ContextBuilder::new(location).map_err(|e| TurnError::Prompt(e.to_string()))?;
    let context = builder.build(history, message);

    tracing::debug!(
        "Requesting completion from {} with {} messages",
        settings.model,
        context.len()
    );

    let text = completion(
        &context,
        &settings.api_hostname,
        &settings.api_key,
        &settings.model,
        &settings.options,
    )
    .await?;

    Ok(augment(&text, message))
}
