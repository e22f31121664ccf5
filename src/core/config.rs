use std::env;

use super::Location;

pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub storage_path: String,
    pub db_path: String,
    pub openai_model: String,
    pub openai_api_hostname: String,
    pub openai_api_key: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub location: Location,
}

impl Default for AppConfig {
    fn default() -> Self {
        let storage_path = env::var("NOVA_STORAGE_PATH").unwrap_or("./".to_string());
        let db_path = format!("{}/db", storage_path.trim_end_matches('/'));
        let openai_api_hostname = env::var("NOVA_LLM_HOST")
            .unwrap_or_else(|_| "https://api.openai.com".to_string());
        let openai_api_key =
            env::var("OPENAI_API_KEY").unwrap_or_else(|_| "thiswontworkforopenai".to_string());
        let openai_model =
            env::var("NOVA_LLM_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        Self {
            storage_path,
            db_path,
            openai_model,
            openai_api_hostname,
            openai_api_key,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            location: Location::default(),
        }
    }
}
