use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;

use crate::application::voice::{VoiceRequest, VoiceResponse};
use crate::infrastructure::http::{error::json_body, ApiError, AppState};

#[derive(Debug, Serialize)]
pub struct VoiceReply {
    success: bool,
    message: &'static str,
    response: VoiceResponse,
}

pub async fn voice_handler(
    State(state): State<AppState>,
    body: Result<Json<VoiceRequest>, JsonRejection>,
) -> Result<Json<VoiceReply>, ApiError> {
    let request = json_body(body)?;
    Ok(Json(VoiceReply {
        success: true,
        message: "Voice call processed successfully",
        response: state.voice.respond(&request),
    }))
}
