//! SMS service - Executes classified commands against the store and gateway

use std::sync::Arc;

use crate::application::errors::ServiceError;
use crate::domain::entities::{
    Alert, InboundMessage, Organization, Reminder, ResourceEntry, ResourceKind, TipFrequency,
    Volunteer, VolunteerPost,
};
use crate::domain::traits::{Gateway, Store};

use super::command::{classify, OrgAction, SmsCommand, VolunteerAction, HELP_REPLY, UNRECOGNIZED_REPLY};

const VOLUNTEER_UNKNOWN_REPLY: &str = "Volunteer command not recognized. Available commands: VOLUNTEER REGISTER, VOLUNTEER LOCATION, VOLUNTEER AVAILABILITY, VOLUNTEER STATUS";
const ORG_UNKNOWN_REPLY: &str = "Organization command not recognized. Available commands: ORG REGISTER, ORG POST, ORG UPDATE, ORG CLOSE";
const NOT_VOLUNTEER_REPLY: &str = "You are not registered as a volunteer. Text VOLUNTEER REGISTER [SKILLS] to sign up.";

/// Service for answering inbound SMS commands
pub struct SmsService {
    store: Arc<dyn Store>,
    gateway: Arc<dyn Gateway>,
}

impl SmsService {
    pub fn new(store: Arc<dyn Store>, gateway: Arc<dyn Gateway>) -> Self {
        Self { store, gateway }
    }

    /// Classify and execute one message, returning the reply text
    pub async fn handle(&self, message: &InboundMessage) -> Result<String, ServiceError> {
        let command = classify(&message.text);
        tracing::info!("[{}] SMS {:?} -> {:?}", message.sender, message.preview(), command);
        self.execute(&message.sender, command).await
    }

    pub async fn execute(&self, phone: &str, command: SmsCommand) -> Result<String, ServiceError> {
        let reply = match command {
            SmsCommand::Tip(category) => category.random_tip().to_string(),
            SmsCommand::Reminder { details } => {
                let title = details.unwrap_or_else(|| "Medication".to_string());
                self.store
                    .save_reminder(&Reminder::new(phone, title).with_kind("medication"))
                    .await?;
                "Medication reminder set. You will receive reminders as scheduled.".to_string()
            }
            SmsCommand::SubscribeTips(frequency) => {
                self.store.set_tip_subscription(phone, Some(frequency)).await?;
                format!(
                    "You have been subscribed to {} health tips. Reply UNSUBSCRIBE to stop receiving tips.",
                    frequency
                )
            }
            SmsCommand::UnsubscribeTips => {
                self.store.set_tip_subscription(phone, None).await?;
                format!(
                    "You have been unsubscribed from health tips. Text SUBSCRIBE {} or SUBSCRIBE {} to resubscribe.",
                    TipFrequency::Daily.as_str().to_uppercase(),
                    TipFrequency::Weekly.as_str().to_uppercase()
                )
            }
            SmsCommand::Help => HELP_REPLY.to_string(),
            SmsCommand::Find { resource, location } => {
                let offers = self
                    .store
                    .find_resources(ResourceKind::Offer, Some(&resource), &location)
                    .await?;
                let listing = if offers.is_empty() {
                    "none registered yet. Text NEED [RESOURCE] [LOCATION] to post a request.".to_string()
                } else {
                    offers
                        .iter()
                        .map(|o| format!("{} (contact {})", o.summary(), o.phone))
                        .collect::<Vec<_>>()
                        .join("; ")
                };
                format!("Here are {} resources in {}: {}", resource, location, listing)
            }
            SmsCommand::Need { resource, location } => {
                let entry = ResourceEntry::new(ResourceKind::Request, phone, &resource, &location);
                self.register_resource(entry).await?;
                format!(
                    "Your request for {} in {} has been registered. You will be notified when a match is found.",
                    resource, location
                )
            }
            SmsCommand::Offer { resource, location } => {
                let entry = ResourceEntry::new(ResourceKind::Offer, phone, &resource, &location);
                self.register_resource(entry).await?;
                format!(
                    "Your offer of {} in {} has been registered. You will be notified when someone needs this resource.",
                    resource, location
                )
            }
            SmsCommand::CheckRequests => {
                self.describe_entries(phone, ResourceKind::Request, "request", "NEED").await?
            }
            SmsCommand::CheckOffers => {
                self.describe_entries(phone, ResourceKind::Offer, "offer", "OFFER").await?
            }
            SmsCommand::Alert { kind, location, details } => {
                let mut alert = Alert::new(phone, kind, location, details);
                alert.id = self.store.save_alert(&alert).await?;
                self.broadcast_alert(&alert).await?;
                let reference = alert.reference();
                format!(
                    "Alert created (ID: {}). Your {} alert for {} has been sent to subscribers. Text UPDATE {} [UPDATE] to provide updates.",
                    reference, alert.kind, alert.location, reference
                )
            }
            SmsCommand::SubscribeAlerts { location } => {
                self.store.set_alert_subscription(phone, &location, true).await?;
                format!(
                    "You have subscribed to alerts for {}. Text UNSUBSCRIBE {} to stop receiving alerts.",
                    location, location
                )
            }
            SmsCommand::UnsubscribeAlerts { location } => {
                self.store.set_alert_subscription(phone, &location, false).await?;
                format!("You have unsubscribed from alerts for {}.", location)
            }
            SmsCommand::Volunteer(action) => self.volunteer(phone, action).await?,
            SmsCommand::Org(action) => self.organization(phone, action).await?,
            SmsCommand::Usage(usage) => usage.text().to_string(),
            SmsCommand::Unrecognized => UNRECOGNIZED_REPLY.to_string(),
        };
        Ok(reply)
    }

    /// Store a request/offer and notify both sides of the oldest open counterpart
    async fn register_resource(&self, mut entry: ResourceEntry) -> Result<(), ServiceError> {
        entry.id = self.store.save_resource(&entry).await?;

        let matches = self
            .store
            .find_resources(entry.kind.counterpart(), Some(&entry.resource), &entry.location)
            .await?;
        let Some(counterpart) = matches.into_iter().find(|m| m.phone != entry.phone) else {
            return Ok(());
        };

        tracing::info!(
            "Matched {} #{} with {} #{}",
            entry.kind.as_str(),
            entry.id,
            counterpart.kind.as_str(),
            counterpart.id
        );
        let (request, offer) = match entry.kind {
            ResourceKind::Request => (&entry, &counterpart),
            ResourceKind::Offer => (&counterpart, &entry),
        };
        self.notify(
            &request.phone,
            &format!(
                "Match found: {} is on offer in {}. Contact {} to arrange.",
                offer.resource, offer.location, offer.phone
            ),
        )
        .await;
        self.notify(
            &offer.phone,
            &format!(
                "Someone in {} needs {} that you offered. Contact {} to arrange.",
                request.location, request.resource, request.phone
            ),
        )
        .await;
        Ok(())
    }

    async fn describe_entries(
        &self,
        phone: &str,
        kind: ResourceKind,
        noun: &str,
        keyword: &str,
    ) -> Result<String, ServiceError> {
        let entries: Vec<_> = self
            .store
            .resources_by_phone(kind, phone)
            .await?
            .into_iter()
            .filter(|e| e.open)
            .collect();
        if entries.is_empty() {
            return Ok(format!(
                "You have no active {}s. Text {} [RESOURCE] [LOCATION] to {} a resource.",
                noun,
                keyword,
                keyword.to_lowercase()
            ));
        }
        let list = entries
            .iter()
            .map(ResourceEntry::summary)
            .collect::<Vec<_>>()
            .join(", ");
        Ok(format!("You have {} active {}(s): {}.", entries.len(), noun, list))
    }

    async fn broadcast_alert(&self, alert: &Alert) -> Result<(), ServiceError> {
        let recipients: Vec<String> = self
            .store
            .alert_subscribers(&alert.location)
            .await?
            .into_iter()
            .filter(|p| p != &alert.phone)
            .collect();
        if recipients.is_empty() {
            tracing::debug!("No subscribers for {}", alert.location);
            return Ok(());
        }
        match self.gateway.send_sms(&recipients, &alert.broadcast_text()).await {
            Ok(report) => tracing::info!(
                "Alert {} delivered to {}/{} subscribers",
                alert.reference(),
                report.delivered(),
                recipients.len()
            ),
            Err(e) => tracing::warn!("Alert {} broadcast failed: {}", alert.reference(), e),
        }
        Ok(())
    }

    async fn volunteer(&self, phone: &str, action: VolunteerAction) -> Result<String, ServiceError> {
        let reply = match action {
            VolunteerAction::Register { skills } => {
                let shown = skills.clone().unwrap_or_else(|| "None specified".to_string());
                let mut volunteer = Volunteer::new(phone);
                volunteer.skills = skills;
                self.store.save_volunteer(&volunteer).await?;
                format!(
                    "You have been registered as a volunteer with skills: {}. Text VOLUNTEER LOCATION to set your location.",
                    shown
                )
            }
            VolunteerAction::Location(location) => {
                let Some(mut volunteer) = self.store.volunteer(phone).await? else {
                    return Ok(NOT_VOLUNTEER_REPLY.to_string());
                };
                let shown = location.clone().unwrap_or_else(|| "None specified".to_string());
                volunteer.location = location;
                self.store.save_volunteer(&volunteer).await?;
                format!("Your volunteer location has been set to: {}.", shown)
            }
            VolunteerAction::Availability(availability) => {
                let Some(mut volunteer) = self.store.volunteer(phone).await? else {
                    return Ok(NOT_VOLUNTEER_REPLY.to_string());
                };
                let shown = availability.clone().unwrap_or_else(|| "None specified".to_string());
                volunteer.availability = availability;
                self.store.save_volunteer(&volunteer).await?;
                format!("Your availability has been set to: {}.", shown)
            }
            VolunteerAction::Status => match self.store.volunteer(phone).await? {
                Some(_) => "Your volunteer profile is active. You will be notified of matching opportunities.".to_string(),
                None => NOT_VOLUNTEER_REPLY.to_string(),
            },
            VolunteerAction::Unknown => VOLUNTEER_UNKNOWN_REPLY.to_string(),
        };
        Ok(reply)
    }

    async fn organization(&self, phone: &str, action: OrgAction) -> Result<String, ServiceError> {
        let reply = match action {
            OrgAction::Register { name } => {
                let name = name.unwrap_or_else(|| "Unnamed".to_string());
                self.store
                    .save_organization(&Organization { phone: phone.to_string(), name: name.clone() })
                    .await?;
                format!(
                    "Organization \"{}\" has been registered. Text ORG POST to create volunteer opportunities.",
                    name
                )
            }
            OrgAction::Post { need, location, details } => {
                let organization = self
                    .store
                    .organization(phone)
                    .await?
                    .map(|o| o.name)
                    .unwrap_or_else(|| phone.to_string());
                let mut post = VolunteerPost {
                    id: 0,
                    organization_phone: phone.to_string(),
                    organization,
                    need,
                    location,
                    details,
                    open: true,
                };
                post.id = self.store.save_post(&post).await?;
                let reference = post.reference();
                format!(
                    "Volunteer opportunity created (ID: {}). Your need for {} in {} has been posted. Text ORG UPDATE {} [UPDATE] to provide updates.",
                    reference, post.need, post.location, reference
                )
            }
            OrgAction::Update { post, update } => {
                let updated = match VolunteerPost::parse_reference(&post) {
                    Some(id) => self.store.update_post(id, phone, &update).await?,
                    None => false,
                };
                if updated {
                    format!("Post {} has been updated with: {}", post, update)
                } else {
                    post_not_found(&post)
                }
            }
            OrgAction::Close { post } => {
                let closed = match VolunteerPost::parse_reference(&post) {
                    Some(id) => self.store.close_post(id, phone).await?,
                    None => false,
                };
                if closed {
                    format!(
                        "Post {} has been closed. No more volunteers will be matched to this opportunity.",
                        post
                    )
                } else {
                    post_not_found(&post)
                }
            }
            OrgAction::Unknown => ORG_UNKNOWN_REPLY.to_string(),
        };
        Ok(reply)
    }

    /// Best-effort single-recipient notification
    async fn notify(&self, phone: &str, text: &str) {
        if let Err(e) = self.gateway.send_sms(&[phone.to_string()], text).await {
            tracing::warn!("Notification to {} via {} failed: {}", phone, self.gateway.name(), e);
        }
    }
}

fn post_not_found(post: &str) -> String {
    format!("Post {} was not found. Text ORG POST to create a new opportunity.", post)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::sms::tips::GENERAL_TIPS;
    use crate::infrastructure::database::SqliteStore;
    use crate::infrastructure::gateway::ConsoleGateway;

    fn service() -> (SmsService, Arc<ConsoleGateway>) {
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        let gateway = Arc::new(ConsoleGateway::new());
        (SmsService::new(store, gateway.clone()), gateway)
    }

    async fn reply(service: &SmsService, phone: &str, text: &str) -> String {
        service.handle(&InboundMessage::sms(phone, text)).await.unwrap()
    }

    #[tokio::test]
    async fn test_tip_reply() {
        let (service, _) = service();
        let tip = reply(&service, "+254700000001", " tip ").await;
        assert!(GENERAL_TIPS.contains(&tip.as_str()));
    }

    #[tokio::test]
    async fn test_find_echoes_resource_and_location() {
        let (service, _) = service();
        let text = reply(&service, "+254700000001", "FIND CLINIC NAIROBI").await;
        assert!(text.contains("CLINIC"));
        assert!(text.contains("NAIROBI"));
    }

    #[tokio::test]
    async fn test_find_lists_offers() {
        let (service, _) = service();
        reply(&service, "+254700000002", "OFFER FOOD KISUMU").await;
        let text = reply(&service, "+254700000001", "find food kisumu").await;
        assert!(text.contains("FOOD in KISUMU (contact +254700000002)"), "{text}");
    }

    #[tokio::test]
    async fn test_need_matches_existing_offer() {
        let (service, gateway) = service();
        reply(&service, "+254700000002", "OFFER MEDICATION NAIROBI").await;
        assert!(gateway.sent().is_empty());

        let text = reply(&service, "+254700000001", "NEED MEDICATION NAIROBI").await;
        assert_eq!(
            text,
            "Your request for MEDICATION in NAIROBI has been registered. You will be notified when a match is found."
        );
        let sent = gateway.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].0, vec!["+254700000001".to_string()]);
        assert_eq!(sent[1].0, vec!["+254700000002".to_string()]);
    }

    #[tokio::test]
    async fn test_check_request() {
        let (service, _) = service();
        let empty = reply(&service, "+254700000001", "CHECK REQUEST").await;
        assert_eq!(
            empty,
            "You have no active requests. Text NEED [RESOURCE] [LOCATION] to request a resource."
        );
        let offers = reply(&service, "+254700000001", "CHECK OFFER").await;
        assert_eq!(
            offers,
            "You have no active offers. Text OFFER [RESOURCE] [LOCATION] to offer a resource."
        );
        reply(&service, "+254700000001", "NEED WATER MOMBASA").await;
        let one = reply(&service, "+254700000001", "CHECK REQUEST").await;
        assert_eq!(one, "You have 1 active request(s): WATER in MOMBASA.");
    }

    #[tokio::test]
    async fn test_alert_reaches_subscribers() {
        let (service, gateway) = service();
        reply(&service, "+254700000002", "SUBSCRIBE NAIROBI").await;
        reply(&service, "+254700000003", "SUBSCRIBE NAIROBI").await;
        reply(&service, "+254700000003", "UNSUBSCRIBE NAIROBI").await;

        let text = reply(&service, "+254700000001", "ALERT MEDICAL NAIROBI AMBULANCE NEEDED").await;
        assert!(text.starts_with("Alert created (ID: ALT0001)."), "{text}");
        assert!(text.contains("Your MEDICAL alert for NAIROBI"));

        let sent = gateway.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, vec!["+254700000002".to_string()]);
        assert_eq!(
            sent[0].1,
            "Emergency Alert: MEDICAL\nLocation: NAIROBI\nDetails: AMBULANCE NEEDED"
        );
    }

    #[tokio::test]
    async fn test_tip_subscription_replies() {
        let (service, _) = service();
        assert_eq!(
            reply(&service, "+254700000001", "subscribe daily").await,
            "You have been subscribed to daily health tips. Reply UNSUBSCRIBE to stop receiving tips."
        );
        assert_eq!(
            reply(&service, "+254700000001", "UNSUBSCRIBE").await,
            "You have been unsubscribed from health tips. Text SUBSCRIBE DAILY or SUBSCRIBE WEEKLY to resubscribe."
        );
    }

    #[tokio::test]
    async fn test_volunteer_flow() {
        let (service, _) = service();
        assert_eq!(
            reply(&service, "+254700000001", "VOLUNTEER STATUS").await,
            "You are not registered as a volunteer. Text VOLUNTEER REGISTER [SKILLS] to sign up."
        );
        assert_eq!(
            reply(&service, "+254700000001", "VOLUNTEER REGISTER").await,
            "You have been registered as a volunteer with skills: None specified. Text VOLUNTEER LOCATION to set your location."
        );
        assert_eq!(
            reply(&service, "+254700000001", "volunteer location nakuru").await,
            "Your volunteer location has been set to: NAKURU."
        );
        assert_eq!(
            reply(&service, "+254700000001", "VOLUNTEER STATUS").await,
            "Your volunteer profile is active. You will be notified of matching opportunities."
        );
    }

    #[tokio::test]
    async fn test_volunteer_settings_require_registration() {
        let (service, _) = service();
        assert_eq!(
            reply(&service, "+254700000004", "VOLUNTEER LOCATION KISUMU").await,
            NOT_VOLUNTEER_REPLY
        );
        assert_eq!(
            reply(&service, "+254700000004", "VOLUNTEER AVAILABILITY WEEKENDS").await,
            NOT_VOLUNTEER_REPLY
        );
        assert_eq!(
            reply(&service, "+254700000004", "VOLUNTEER STATUS").await,
            NOT_VOLUNTEER_REPLY
        );

        reply(&service, "+254700000004", "VOLUNTEER REGISTER FIRST AID").await;
        reply(&service, "+254700000004", "VOLUNTEER AVAILABILITY WEEKENDS").await;
        let volunteer = service.store.volunteer("+254700000004").await.unwrap().unwrap();
        assert_eq!(volunteer.skills.as_deref(), Some("FIRST AID"));
        assert_eq!(volunteer.availability.as_deref(), Some("WEEKENDS"));
    }

    #[tokio::test]
    async fn test_org_post_update_close() {
        let (service, _) = service();
        reply(&service, "+254700000009", "ORG REGISTER RED CROSS").await;
        let posted = reply(
            &service,
            "+254700000009",
            "ORG POST DRIVERS NAIROBI NEED 3 DRIVERS FOR MEDICAL DELIVERIES",
        )
        .await;
        assert_eq!(
            posted,
            "Volunteer opportunity created (ID: POST1). Your need for DRIVERS in NAIROBI has been posted. Text ORG UPDATE POST1 [UPDATE] to provide updates."
        );
        // Only the posting organisation can change the post
        assert_eq!(
            reply(&service, "+254711111111", "ORG UPDATE POST1 CANCELLED IGNORE").await,
            "Post POST1 was not found. Text ORG POST to create a new opportunity."
        );
        assert_eq!(
            reply(&service, "+254711111111", "ORG CLOSE POST1").await,
            "Post POST1 was not found. Text ORG POST to create a new opportunity."
        );
        assert_eq!(
            reply(&service, "+254700000009", "ORG UPDATE POST1 NEED 2 MORE").await,
            "Post POST1 has been updated with: NEED 2 MORE"
        );
        assert_eq!(
            reply(&service, "+254700000009", "ORG CLOSE POST1").await,
            "Post POST1 has been closed. No more volunteers will be matched to this opportunity."
        );
        assert_eq!(
            reply(&service, "+254700000009", "ORG CLOSE POST99").await,
            "Post POST99 was not found. Text ORG POST to create a new opportunity."
        );
    }

    #[tokio::test]
    async fn test_usage_and_unrecognized_never_empty() {
        let (service, _) = service();
        for text in ["FIND", "NEED X", "ALERT A B", "VOLUNTEER", "ORG", "blah", ""] {
            assert!(!reply(&service, "+254700000001", text).await.is_empty(), "{text:?}");
        }
        assert_eq!(reply(&service, "+254700000001", "blah").await, UNRECOGNIZED_REPLY);
        assert_eq!(reply(&service, "+254700000001", "help").await, HELP_REPLY);
    }
}
