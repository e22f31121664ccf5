//! Router for the chat API

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};

use super::public;
use crate::ai::{ModelSettings, respond};
use crate::api::public::{ApiError, ErrorResponse};
use crate::api::state::AppState;

type SharedState = Arc<AppState>;

/// Answer the next message of a conversation
async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<public::ChatRequest>,
) -> Result<Response, ApiError> {
    if payload.message.trim().is_empty() {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Message is required")),
        )
            .into_response());
    }

    let settings = ModelSettings::from(&state.config);
    let location = payload
        .location
        .unwrap_or_else(|| state.config.location.clone());

    tracing::info!(
        "Chat request with {} prior messages for {}",
        payload.history.len(),
        location.city
    );

    let reply: public::ChatResponse =
        respond(&settings, &location, &payload.history, &payload.message).await?;

    Ok(Json(reply).into_response())
}

// Usually answered by the CORS layer before reaching the router
// but an OPTIONS request must never be processed as a chat turn.
async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Create the chat router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", post(chat_handler).options(preflight))
}
