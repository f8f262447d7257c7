use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::application::services::HealthProfile;
use crate::infrastructure::http::{error::json_body, ApiError, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TipsRequest {
    #[serde(default)]
    pub health_profile: HealthProfile,
}

#[derive(Debug, Serialize)]
pub struct TipsResponse {
    success: bool,
    tips: Vec<String>,
}

/// Never fails once the body parses; the service falls back to stock tips
pub async fn tips_handler(
    State(state): State<AppState>,
    body: Result<Json<TipsRequest>, JsonRejection>,
) -> Result<Json<TipsResponse>, ApiError> {
    let request = json_body(body)?;
    let tips = state.tips.generate(&request.health_profile).await;
    Ok(Json(TipsResponse {
        success: true,
        tips,
    }))
}
