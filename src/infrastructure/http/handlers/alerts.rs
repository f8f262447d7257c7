use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;

use crate::application::services::AlertRequest;
use crate::domain::traits::DeliveryReport;
use crate::infrastructure::http::{error::json_body, ApiError, AppState};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertResponse {
    success: bool,
    message: &'static str,
    alert_id: String,
    /// `null` when the broadcast could not be sent
    sms_response: Option<DeliveryReport>,
}

pub async fn alert_handler(
    State(state): State<AppState>,
    body: Result<Json<AlertRequest>, JsonRejection>,
) -> Result<Json<AlertResponse>, ApiError> {
    let request = json_body(body)?;
    let (alert, report) = state
        .alerts
        .send(&request)
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to send alert"))?;

    let message = if report.is_some() {
        "Alert sent successfully"
    } else {
        "Alert recorded but SMS delivery failed"
    };
    Ok(Json(AlertResponse {
        success: true,
        message,
        alert_id: alert.reference(),
        sms_response: report,
    }))
}
