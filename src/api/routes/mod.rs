//! API routes module

pub mod chat;

use std::sync::Arc;

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

use crate::api::state::AppState;

type SharedState = Arc<AppState>;

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // Chat routes
        .nest("/chat", chat::router())
        .route("/health", get(health))
}
