//! Application services - Dashboard use cases

pub mod alert_service;
pub mod community_service;
pub mod reminder_service;
pub mod tips_service;

pub use alert_service::{AlertRequest, AlertService};
pub use community_service::{
    CommunityService, GroupMessageRequest, JoinGroupRequest, PostNeedRequest, VolunteerRequest,
};
pub use reminder_service::{ReminderAction, ReminderOutcome, ReminderRequest, ReminderService};
pub use tips_service::{HealthProfile, TipsService, FALLBACK_TIPS};
