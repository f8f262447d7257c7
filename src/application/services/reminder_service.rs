use serde::{Deserialize, Deserializer};
use std::sync::Arc;

use crate::application::errors::ServiceError;
use crate::domain::entities::Reminder;
use crate::domain::traits::{DeliveryReport, Gateway, Store};

/// Reminder fields as sent by the dashboard
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderData {
    /// Accepts `"7"` as well as `7`
    #[serde(default, deserialize_with = "id_from_string_or_number")]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub days: Vec<String>,
    #[serde(default)]
    pub active: Option<bool>,
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Number(i64),
        Text(String),
    }
    match Option::<Id>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Id::Number(n)) => Ok(Some(n)),
        Some(Id::Text(s)) => s.trim().parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderRequest {
    pub action: String,
    #[serde(default)]
    pub reminder_data: Option<ReminderData>,
    pub phone_number: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderAction {
    Create,
    Update,
    Delete,
    List,
}

impl ReminderAction {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "create" => Some(ReminderAction::Create),
            "update" => Some(ReminderAction::Update),
            "delete" => Some(ReminderAction::Delete),
            "list" => Some(ReminderAction::List),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderAction::Create => "create",
            ReminderAction::Update => "update",
            ReminderAction::Delete => "delete",
            ReminderAction::List => "list",
        }
    }
}

/// Result of a reminder action. The delivery report is `None` when the
/// confirmation SMS could not be sent; the stored change stands either way.
#[derive(Debug, Clone)]
pub enum ReminderOutcome {
    Created(Reminder, Option<DeliveryReport>),
    Updated(Reminder, Option<DeliveryReport>),
    Deleted(Option<DeliveryReport>),
    Listed(Vec<Reminder>),
}

/// Medication and check-up reminders managed from the dashboard
pub struct ReminderService {
    store: Arc<dyn Store>,
    gateway: Arc<dyn Gateway>,
}

impl ReminderService {
    pub fn new(store: Arc<dyn Store>, gateway: Arc<dyn Gateway>) -> Self {
        Self { store, gateway }
    }

    pub async fn handle(
        &self,
        action: ReminderAction,
        request: &ReminderRequest,
    ) -> Result<ReminderOutcome, ServiceError> {
        let phone = request.phone_number.trim();
        if phone.is_empty() {
            return Err(ServiceError::InvalidRequest("phoneNumber is required".to_string()));
        }
        let data = request.reminder_data.clone().unwrap_or_default();

        match action {
            ReminderAction::Create => {
                let mut reminder = to_reminder(phone, &data)?;
                reminder.id = self.store.save_reminder(&reminder).await?;
                let message = format!(
                    "Your reminder \"{}\" has been created. You will receive reminders at {} on your selected days.",
                    reminder.title,
                    reminder.time.as_deref().unwrap_or("the scheduled time")
                );
                let report = self.confirm(phone, &message).await;
                Ok(ReminderOutcome::Created(reminder, report))
            }
            ReminderAction::Update => {
                let id = data
                    .id
                    .ok_or_else(|| ServiceError::InvalidRequest("reminderData.id is required".to_string()))?;
                let mut reminder = to_reminder(phone, &data)?;
                reminder.id = id;
                if let Some(active) = data.active {
                    reminder.active = active;
                }
                if !self.store.update_reminder(&reminder).await? {
                    return Err(ServiceError::NotFound(format!("reminder {}", id)));
                }
                let message = format!(
                    "Your reminder \"{}\" has been updated. You will now receive reminders at {} on your selected days.",
                    reminder.title,
                    reminder.time.as_deref().unwrap_or("the scheduled time")
                );
                let report = self.confirm(phone, &message).await;
                Ok(ReminderOutcome::Updated(reminder, report))
            }
            ReminderAction::Delete => {
                let id = data
                    .id
                    .ok_or_else(|| ServiceError::InvalidRequest("reminderData.id is required".to_string()))?;
                if !self.store.delete_reminder(phone, id).await? {
                    return Err(ServiceError::NotFound(format!("reminder {}", id)));
                }
                let report = self.confirm(phone, "Your reminder has been deleted.").await;
                Ok(ReminderOutcome::Deleted(report))
            }
            ReminderAction::List => Ok(ReminderOutcome::Listed(self.store.list_reminders(phone).await?)),
        }
    }

    async fn confirm(&self, phone: &str, message: &str) -> Option<DeliveryReport> {
        match self.gateway.send_sms(&[phone.to_string()], message).await {
            Ok(report) => Some(report),
            Err(e) => {
                tracing::warn!("Reminder confirmation to {} failed: {}", phone, e);
                None
            }
        }
    }
}

fn to_reminder(phone: &str, data: &ReminderData) -> Result<Reminder, ServiceError> {
    if data.title.trim().is_empty() {
        return Err(ServiceError::InvalidRequest("reminderData.title is required".to_string()));
    }
    let mut reminder = Reminder::new(phone, data.title.trim()).with_days(data.days.clone());
    if let Some(kind) = &data.kind {
        reminder = reminder.with_kind(kind.as_str());
    }
    if let Some(time) = &data.time {
        reminder = reminder.with_time(time.as_str());
    }
    Ok(reminder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::errors::GatewayError;
    use crate::infrastructure::database::SqliteStore;
    use crate::infrastructure::gateway::ConsoleGateway;
    use async_trait::async_trait;

    const PHONE: &str = "+254700000001";

    struct OfflineGateway;

    #[async_trait]
    impl Gateway for OfflineGateway {
        fn name(&self) -> &str {
            "offline"
        }

        async fn send_sms(&self, _: &[String], _: &str) -> Result<DeliveryReport, GatewayError> {
            Err(GatewayError::Network("connection refused".to_string()))
        }
    }

    fn service() -> (ReminderService, Arc<ConsoleGateway>) {
        let gateway = Arc::new(ConsoleGateway::new());
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        (ReminderService::new(store, gateway.clone()), gateway)
    }

    fn request(action: &str, data: serde_json::Value) -> ReminderRequest {
        serde_json::from_value(serde_json::json!({
            "action": action,
            "reminderData": data,
            "phoneNumber": PHONE,
        }))
        .unwrap()
    }

    #[test]
    fn test_id_accepts_string_or_number() {
        let data: ReminderData = serde_json::from_value(serde_json::json!({"id": "3"})).unwrap();
        assert_eq!(data.id, Some(3));
        let data: ReminderData = serde_json::from_value(serde_json::json!({"id": 4})).unwrap();
        assert_eq!(data.id, Some(4));
        let data: ReminderData = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(data.id, None);
    }

    #[tokio::test]
    async fn test_create_update_delete_list() {
        let (service, gateway) = service();
        let created = service
            .handle(
                ReminderAction::Create,
                &request("create", serde_json::json!({
                    "title": "Take Blood Pressure Medication",
                    "type": "medication",
                    "time": "08:00",
                    "days": ["Monday", "Friday"]
                })),
            )
            .await
            .unwrap();
        let ReminderOutcome::Created(reminder, _) = created else {
            panic!("expected Created");
        };
        assert_eq!(
            gateway.sent()[0].1,
            "Your reminder \"Take Blood Pressure Medication\" has been created. You will receive reminders at 08:00 on your selected days."
        );

        service
            .handle(
                ReminderAction::Update,
                &request("update", serde_json::json!({
                    "id": reminder.id.to_string(),
                    "title": "Take Blood Pressure Medication",
                    "time": "09:00"
                })),
            )
            .await
            .unwrap();
        assert!(gateway.sent()[1].1.contains("You will now receive reminders at 09:00"));

        let ReminderOutcome::Listed(list) = service
            .handle(ReminderAction::List, &request("list", serde_json::json!(null)))
            .await
            .unwrap()
        else {
            panic!("expected Listed");
        };
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].time.as_deref(), Some("09:00"));

        service
            .handle(ReminderAction::Delete, &request("delete", serde_json::json!({"id": reminder.id})))
            .await
            .unwrap();
        assert_eq!(gateway.sent()[2].1, "Your reminder has been deleted.");

        let missing = service
            .handle(ReminderAction::Delete, &request("delete", serde_json::json!({"id": reminder.id})))
            .await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_failed_confirmation_keeps_reminder() {
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        let service = ReminderService::new(store.clone(), Arc::new(OfflineGateway));
        let create = request("create", serde_json::json!({"title": "Clinic visit", "time": "10:00"}));

        let outcome = service.handle(ReminderAction::Create, &create).await.unwrap();
        let ReminderOutcome::Created(reminder, report) = outcome else {
            panic!("expected Created");
        };
        assert!(report.is_none());
        assert_eq!(store.list_reminders(PHONE).await.unwrap().len(), 1);

        let delete = request("delete", serde_json::json!({"id": reminder.id}));
        let outcome = service.handle(ReminderAction::Delete, &delete).await.unwrap();
        assert!(matches!(outcome, ReminderOutcome::Deleted(None)));
        assert!(store.list_reminders(PHONE).await.unwrap().is_empty());
    }

    #[test]
    fn test_action_parse() {
        assert_eq!(ReminderAction::parse("create"), Some(ReminderAction::Create));
        assert_eq!(ReminderAction::parse("snooze"), None);
    }
}
