use async_trait::async_trait;

use crate::application::errors::StorageError;
use crate::domain::entities::{
    Alert, Appointment, Organization, Reminder, ResourceEntry, ResourceKind, TipFrequency,
    Volunteer, VolunteerPost,
};

/// Store trait - abstraction for data persistence
#[async_trait]
pub trait Store: Send + Sync {
    // Reminder operations
    async fn save_reminder(&self, reminder: &Reminder) -> Result<i64, StorageError>;
    async fn update_reminder(&self, reminder: &Reminder) -> Result<bool, StorageError>;
    async fn delete_reminder(&self, phone: &str, id: i64) -> Result<bool, StorageError>;
    async fn list_reminders(&self, phone: &str) -> Result<Vec<Reminder>, StorageError>;

    // Health tip subscriptions; `None` unsubscribes
    async fn set_tip_subscription(
        &self,
        phone: &str,
        frequency: Option<TipFrequency>,
    ) -> Result<(), StorageError>;
    async fn tip_subscription(&self, phone: &str) -> Result<Option<TipFrequency>, StorageError>;

    // Community resources
    async fn save_resource(&self, entry: &ResourceEntry) -> Result<i64, StorageError>;
    async fn resources_by_phone(
        &self,
        kind: ResourceKind,
        phone: &str,
    ) -> Result<Vec<ResourceEntry>, StorageError>;
    /// Open entries of `kind` at `location`, optionally narrowed to one resource type
    async fn find_resources(
        &self,
        kind: ResourceKind,
        resource: Option<&str>,
        location: &str,
    ) -> Result<Vec<ResourceEntry>, StorageError>;

    // Emergency alerts
    async fn save_alert(&self, alert: &Alert) -> Result<i64, StorageError>;
    async fn set_alert_subscription(
        &self,
        phone: &str,
        location: &str,
        subscribed: bool,
    ) -> Result<(), StorageError>;
    async fn alert_subscribers(&self, location: &str) -> Result<Vec<String>, StorageError>;

    // Volunteers and organisations
    /// Upsert; `None` fields keep their stored value
    async fn save_volunteer(&self, volunteer: &Volunteer) -> Result<(), StorageError>;
    async fn volunteer(&self, phone: &str) -> Result<Option<Volunteer>, StorageError>;
    async fn save_organization(&self, organization: &Organization) -> Result<(), StorageError>;
    async fn organization(&self, phone: &str) -> Result<Option<Organization>, StorageError>;
    async fn save_post(&self, post: &VolunteerPost) -> Result<i64, StorageError>;
    /// `false` when no post `id` belongs to `phone`
    async fn update_post(&self, id: i64, phone: &str, update: &str) -> Result<bool, StorageError>;
    async fn close_post(&self, id: i64, phone: &str) -> Result<bool, StorageError>;
    /// Open volunteer posts at `location`
    async fn open_posts(&self, location: &str) -> Result<Vec<VolunteerPost>, StorageError>;

    // Appointments
    async fn save_appointment(&self, appointment: &Appointment) -> Result<i64, StorageError>;

    // Support groups
    async fn join_group(&self, group: &str, member: &str) -> Result<(), StorageError>;
    async fn save_group_message(&self, group: &str, message: &str) -> Result<(), StorageError>;
}
