use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::entities::InboundMessage;
use crate::infrastructure::http::{error::json_body, ApiError, AppState};

const FAILURE: &str = "Failed to process SMS";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsRequest {
    pub message: String,
    pub phone_number: String,
}

#[derive(Debug, Serialize)]
pub struct SmsResponse {
    success: bool,
    message: &'static str,
    response: String,
}

pub async fn sms_handler(
    State(state): State<AppState>,
    body: Result<Json<SmsRequest>, JsonRejection>,
) -> Result<Json<SmsResponse>, ApiError> {
    let request = json_body(body)?;
    state
        .rate_limiter
        .check(&request.phone_number)
        .map_err(|e| ApiError::from_service(e, FAILURE))?;

    let inbound = InboundMessage::sms(request.phone_number.trim(), request.message);
    let reply = state
        .sms
        .handle(&inbound)
        .await
        .map_err(|e| ApiError::from_service(e, FAILURE))?;

    Ok(Json(SmsResponse {
        success: true,
        message: "SMS processed successfully",
        response: reply,
    }))
}
