use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;

use crate::application::chat::{ChatReply, ChatRequest};
use crate::infrastructure::http::{error::json_body, ApiError, AppState};

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    success: bool,
    message: &'static str,
    response: ChatReply,
}

pub async fn chat_handler(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let mut request = json_body(body)?;
    if request.session_id.trim().is_empty() {
        request.session_id = uuid::Uuid::new_v4().to_string();
    }
    let key = if request.user_id.is_empty() {
        &request.session_id
    } else {
        &request.user_id
    };
    state
        .rate_limiter
        .check(key)
        .map_err(|e| ApiError::from_service(e, "Failed to process chat message"))?;

    Ok(Json(ChatResponse {
        success: true,
        message: "Chat message processed successfully",
        response: state.chat.reply(&request),
    }))
}
