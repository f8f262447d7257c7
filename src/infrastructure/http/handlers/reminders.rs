use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::{json, Value};

use crate::application::services::{ReminderAction, ReminderOutcome, ReminderRequest};
use crate::infrastructure::http::{error::json_body, ApiError, AppState};

fn failure(action: ReminderAction) -> &'static str {
    match action {
        ReminderAction::Create => "Failed to create reminder",
        ReminderAction::Update => "Failed to update reminder",
        ReminderAction::Delete => "Failed to delete reminder",
        ReminderAction::List => "Failed to list reminders",
    }
}

pub async fn reminder_handler(
    State(state): State<AppState>,
    body: Result<Json<ReminderRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let request = json_body(body)?;
    let action = ReminderAction::parse(&request.action)
        .ok_or_else(|| ApiError::BadRequest("Invalid action".to_string()))?;

    let outcome = state
        .reminders
        .handle(action, &request)
        .await
        .map_err(|e| ApiError::from_service(e, failure(action)))?;

    let body = match outcome {
        ReminderOutcome::Created(reminder, report) => json!({
            "success": true,
            "message": "Reminder created successfully",
            "reminderData": reminder,
            "smsResponse": report,
        }),
        ReminderOutcome::Updated(reminder, report) => json!({
            "success": true,
            "message": "Reminder updated successfully",
            "reminderData": reminder,
            "smsResponse": report,
        }),
        ReminderOutcome::Deleted(report) => json!({
            "success": true,
            "message": "Reminder deleted successfully",
            "smsResponse": report,
        }),
        ReminderOutcome::Listed(reminders) => json!({
            "success": true,
            "reminders": reminders,
        }),
    };
    Ok(Json(body))
}
