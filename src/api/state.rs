use crate::core::AppConfig;

/// Read-only for the lifetime of the server. Each request builds its
/// own context from the payload so nothing about a conversation is
/// kept here.
pub struct AppState {
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }
}
