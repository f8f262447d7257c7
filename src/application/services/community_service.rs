use serde::Deserialize;
use std::sync::Arc;

use crate::application::errors::ServiceError;
use crate::domain::entities::{Volunteer, VolunteerPost};
use crate::domain::traits::Store;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinGroupRequest {
    pub group: String,
    /// Phone number or user id of the member, when known
    #[serde(default)]
    pub member: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroupMessageRequest {
    pub group: String,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VolunteerRequest {
    #[serde(default)]
    pub name: Option<String>,
    pub phone: String,
    #[serde(default)]
    pub skills: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostNeedRequest {
    /// Organisation contact; the only sender allowed to update or close the post by SMS
    #[serde(default)]
    pub phone: String,
    pub organization: String,
    pub need: String,
    pub location: String,
    #[serde(default)]
    pub details: String,
}

fn required(field: &str, value: &str) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        return Err(ServiceError::InvalidRequest(format!("{} is required", field)));
    }
    Ok(())
}

/// Support groups and volunteering from the dashboard
pub struct CommunityService {
    store: Arc<dyn Store>,
}

impl CommunityService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn join_group(&self, request: &JoinGroupRequest) -> Result<(), ServiceError> {
        required("group", &request.group)?;
        let member = request.member.as_deref().unwrap_or("anonymous");
        self.store.join_group(request.group.trim(), member).await?;
        tracing::info!("{} joined group {}", member, request.group);
        Ok(())
    }

    pub async fn send_message(&self, request: &GroupMessageRequest) -> Result<(), ServiceError> {
        required("group", &request.group)?;
        required("message", &request.message)?;
        self.store
            .save_group_message(request.group.trim(), request.message.trim())
            .await?;
        tracing::debug!("Message posted to group {}", request.group);
        Ok(())
    }

    pub async fn register_volunteer(&self, request: &VolunteerRequest) -> Result<(), ServiceError> {
        required("phone", &request.phone)?;
        let volunteer = Volunteer {
            name: request.name.clone(),
            skills: request.skills.clone(),
            ..Volunteer::new(request.phone.trim())
        };
        self.store.save_volunteer(&volunteer).await?;
        tracing::info!("Volunteer registered: {}", volunteer.phone);
        Ok(())
    }

    /// Returns the public post reference
    pub async fn post_need(&self, request: &PostNeedRequest) -> Result<String, ServiceError> {
        required("organization", &request.organization)?;
        required("need", &request.need)?;
        required("location", &request.location)?;
        let mut post = VolunteerPost {
            id: 0,
            organization_phone: request.phone.trim().to_string(),
            organization: request.organization.trim().to_string(),
            need: request.need.trim().to_string(),
            location: request.location.trim().to_uppercase(),
            details: request.details.trim().to_string(),
            open: true,
        };
        post.id = self.store.save_post(&post).await?;
        tracing::info!("Volunteer need {} posted by {}", post.reference(), post.organization);
        Ok(post.reference())
    }
}
