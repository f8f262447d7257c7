use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;

use crate::application::services::{
    GroupMessageRequest, JoinGroupRequest, PostNeedRequest, VolunteerRequest,
};
use crate::infrastructure::http::{error::json_body, ApiError, AppState};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityResponse {
    success: bool,
    message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    post_id: Option<String>,
}

impl CommunityResponse {
    fn ok(message: &'static str) -> Json<Self> {
        Json(Self {
            success: true,
            message,
            post_id: None,
        })
    }
}

pub async fn join_group_handler(
    State(state): State<AppState>,
    body: Result<Json<JoinGroupRequest>, JsonRejection>,
) -> Result<Json<CommunityResponse>, ApiError> {
    let request = json_body(body)?;
    state
        .community
        .join_group(&request)
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to join group"))?;
    Ok(CommunityResponse::ok("Joined group successfully"))
}

pub async fn send_message_handler(
    State(state): State<AppState>,
    body: Result<Json<GroupMessageRequest>, JsonRejection>,
) -> Result<Json<CommunityResponse>, ApiError> {
    let request = json_body(body)?;
    state
        .community
        .send_message(&request)
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to send message"))?;
    Ok(CommunityResponse::ok("Message sent successfully"))
}

pub async fn volunteer_handler(
    State(state): State<AppState>,
    body: Result<Json<VolunteerRequest>, JsonRejection>,
) -> Result<Json<CommunityResponse>, ApiError> {
    let request = json_body(body)?;
    state
        .community
        .register_volunteer(&request)
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to register volunteer"))?;
    Ok(CommunityResponse::ok("Volunteer registered successfully"))
}

pub async fn post_need_handler(
    State(state): State<AppState>,
    body: Result<Json<PostNeedRequest>, JsonRejection>,
) -> Result<Json<CommunityResponse>, ApiError> {
    let request = json_body(body)?;
    let reference = state
        .community
        .post_need(&request)
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to post volunteer need"))?;
    Ok(Json(CommunityResponse {
        success: true,
        message: "Volunteer need posted successfully",
        post_id: Some(reference),
    }))
}
