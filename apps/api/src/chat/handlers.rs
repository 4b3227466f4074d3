use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::chat::{ChatError, ChatTurn, EMPTY_REPLY, ERROR_REPLY};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// POST /api/v1/chat
/// Always answers 200: assistant failures degrade to static apology strings.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let reply = match state.chat.reply(&req.message, &req.history).await {
        Ok(text) => text,
        Err(ChatError::Empty) => EMPTY_REPLY.to_string(),
        Err(e) => {
            warn!("Assistant call failed: {e}");
            ERROR_REPLY.to_string()
        }
    };
    Json(ChatResponse { reply })
}
