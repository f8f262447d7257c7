//! USSD service - Session tracking and side effects for the menu machine

use serde::Deserialize;
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::application::errors::ServiceError;
use crate::domain::entities::{Appointment, ResourceKind};
use crate::domain::traits::{Gateway, Store};
use crate::infrastructure::session::SessionStore;

use super::menu::{self, AreaSearch, UssdAction, UssdOutcome, UssdState};
use super::screen::Screen;

/// Gateway callback fields
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UssdRequest {
    pub session_id: String,
    #[serde(default)]
    pub service_code: String,
    pub phone_number: String,
    #[serde(default)]
    pub text: String,
}

/// Last trail seen for a session and the state it led to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UssdSession {
    pub trail: String,
    pub state: UssdState,
    /// Reached an `END` screen; kept until expiry so a redelivered final
    /// callback does not run its action twice
    pub finished: bool,
}

/// Screen for the gateway plus the side effect it triggered, if any
#[derive(Debug)]
pub struct UssdReply {
    pub screen: Screen,
    pub follow_up: Option<JoinHandle<()>>,
}

pub struct UssdService {
    sessions: SessionStore<UssdSession>,
    effects: Effects,
}

/// Store and gateway handles moved into follow-up tasks
#[derive(Clone)]
struct Effects {
    store: Arc<dyn Store>,
    gateway: Arc<dyn Gateway>,
}

impl UssdService {
    pub fn new(
        sessions: SessionStore<UssdSession>,
        store: Arc<dyn Store>,
        gateway: Arc<dyn Gateway>,
    ) -> Self {
        Self {
            sessions,
            effects: Effects { store, gateway },
        }
    }

    /// Answer one gateway callback with the next screen. Follow-up SMS and
    /// store writes run in the background.
    pub async fn handle(&self, request: &UssdRequest) -> Result<Screen, ServiceError> {
        Ok(self.respond(request).await?.screen)
    }

    /// Like `handle`, but hands back the follow-up task so callers can wait on it
    pub async fn respond(&self, request: &UssdRequest) -> Result<UssdReply, ServiceError> {
        if request.session_id.trim().is_empty() {
            return Err(ServiceError::InvalidRequest("missing sessionId".to_string()));
        }

        let trail = request.text.trim();
        let outcome = match self.sessions.get(&request.session_id) {
            Some(session) if session.finished && session.trail == trail => {
                tracing::warn!(
                    "Repeated final callback for USSD session {}, action skipped",
                    request.session_id
                );
                UssdOutcome {
                    action: None,
                    ..menu::replay(trail)
                }
            }
            Some(session) if !session.finished => match next_segment(&session.trail, trail) {
                Some(segment) => menu::advance(&session.state, segment),
                None => menu::replay(trail),
            },
            Some(_) => menu::replay(trail),
            None => {
                tracing::info!(
                    "USSD session {} started by {} on {}",
                    request.session_id,
                    request.phone_number,
                    request.service_code
                );
                menu::replay(trail)
            }
        };

        let UssdOutcome {
            state,
            screen,
            action,
        } = outcome;
        tracing::debug!("USSD {} [{}] -> {:?}", request.session_id, trail, state);

        // Recorded before the action starts so a redelivery sees `finished`
        self.sessions.set(
            request.session_id.clone(),
            UssdSession {
                trail: trail.to_string(),
                state,
                finished: screen.is_end(),
            },
        );

        let follow_up = action.map(|action| {
            let effects = self.effects.clone();
            let phone = request.phone_number.clone();
            tokio::spawn(async move {
                if let Err(e) = effects.execute(&phone, action).await {
                    tracing::error!("USSD action for {} failed: {}", phone, e);
                }
            })
        });

        Ok(UssdReply { screen, follow_up })
    }
}

impl Effects {
    async fn execute(&self, phone: &str, action: UssdAction) -> Result<(), ServiceError> {
        let message = match action {
            UssdAction::BookAppointment(booking) => {
                let mut appointment = Appointment::new(
                    phone,
                    booking.facility,
                    booking.service,
                    booking.date,
                    booking.time,
                );
                appointment.id = self.store.save_appointment(&appointment).await?;
                tracing::info!("Appointment #{} booked for {}", appointment.id, phone);
                appointment.confirmation_text()
            }
            UssdAction::FindNearby { search, area } => self.nearby(search, &area).await?,
            UssdAction::FollowUp { item } => item.follow_up.to_string(),
        };
        self.gateway.send_sms(&[phone.to_string()], &message).await?;
        Ok(())
    }

    async fn nearby(&self, search: AreaSearch, area: &str) -> Result<String, ServiceError> {
        let area = area.to_uppercase();
        let found: Vec<String> = match search {
            AreaSearch::HealthFacility => self
                .store
                .find_resources(ResourceKind::Offer, Some("CLINIC"), &area)
                .await?
                .iter()
                .map(|o| format!("{} (contact {})", o.summary(), o.phone))
                .collect(),
            AreaSearch::CommunityResources => self
                .store
                .find_resources(ResourceKind::Offer, None, &area)
                .await?
                .iter()
                .map(|o| format!("{} (contact {})", o.summary(), o.phone))
                .collect(),
            AreaSearch::VolunteerOpportunities => self
                .store
                .open_posts(&area)
                .await?
                .iter()
                .map(|p| format!("{} {} with {}", p.reference(), p.need, p.organization))
                .collect(),
        };

        Ok(if found.is_empty() {
            format!("Ujamaa Health: no {} registered in {} yet.", search.label(), area)
        } else {
            format!("Ujamaa Health: {} in {}: {}", search.label(), area, found.join("; "))
        })
    }
}

/// The single new segment when `trail` extends `previous` by one step
fn next_segment<'a>(previous: &str, trail: &'a str) -> Option<&'a str> {
    if previous.is_empty() {
        return (!trail.is_empty() && !trail.contains('*')).then_some(trail);
    }
    trail
        .strip_prefix(previous)
        .and_then(|rest| rest.strip_prefix('*'))
        .filter(|segment| !segment.contains('*'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::errors::GatewayError;
    use crate::domain::traits::DeliveryReport;
    use crate::infrastructure::database::SqliteStore;
    use crate::infrastructure::gateway::ConsoleGateway;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::Notify;

    /// Holds every send until released
    #[derive(Default)]
    struct HeldGateway {
        release: Notify,
        sent: AtomicUsize,
    }

    #[async_trait]
    impl Gateway for HeldGateway {
        fn name(&self) -> &str {
            "held"
        }

        async fn send_sms(&self, _: &[String], _: &str) -> Result<DeliveryReport, GatewayError> {
            self.release.notified().await;
            self.sent.fetch_add(1, Ordering::SeqCst);
            Ok(DeliveryReport::default())
        }
    }

    fn service() -> (UssdService, SessionStore<UssdSession>, Arc<ConsoleGateway>) {
        let sessions = SessionStore::new(Duration::from_secs(180));
        let gateway = Arc::new(ConsoleGateway::new());
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        let service = UssdService::new(sessions.clone(), store, gateway.clone());
        (service, sessions, gateway)
    }

    fn request(session: &str, text: &str) -> UssdRequest {
        UssdRequest {
            session_id: session.to_string(),
            service_code: "*384*123#".to_string(),
            phone_number: "+254700000001".to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_next_segment() {
        assert_eq!(next_segment("", "1"), Some("1"));
        assert_eq!(next_segment("", "1*2"), None);
        assert_eq!(next_segment("1", "1*2"), Some("2"));
        assert_eq!(next_segment("1", "1*2*3"), None);
        assert_eq!(next_segment("1*2", "1*3"), None);
        assert_eq!(next_segment("1", "11"), None);
    }

    #[tokio::test]
    async fn test_incremental_matches_replay() {
        let (service, _, _) = service();
        let trail = ["", "1", "1*2", "1*2*1", "1*2*1*1", "1*2*1*1*1", "1*2*1*1*1*1"];
        for text in trail {
            let screen = service.handle(&request("s1", text)).await.unwrap();
            assert_eq!(screen, menu::replay(text).screen, "{text}");
        }
    }

    #[tokio::test]
    async fn test_end_marks_session_finished_and_sends_sms() {
        let (service, sessions, gateway) = service();
        service.handle(&request("s2", "")).await.unwrap();
        assert_eq!(sessions.len(), 1);

        let reply = service.respond(&request("s2", "1*2*1*1*1*1*1")).await.unwrap();
        assert!(reply.screen.is_end());
        reply.follow_up.expect("booking action").await.unwrap();
        assert!(sessions.get("s2").unwrap().finished);

        let sent = gateway.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].1.contains("General check-up appointment (Hospital)"), "{}", sent[0].1);
    }

    #[tokio::test]
    async fn test_redelivered_end_does_not_book_twice() {
        let (service, _, gateway) = service();
        let first = service.respond(&request("s4", "1*2*1*1*1*1*1")).await.unwrap();
        first.follow_up.expect("booking action").await.unwrap();

        let again = service.respond(&request("s4", "1*2*1*1*1*1*1")).await.unwrap();
        assert_eq!(again.screen, first.screen);
        assert!(again.follow_up.is_none());
        assert_eq!(gateway.sent().len(), 1);

        // A different session books on its own
        let other = service.respond(&request("s5", "1*2*1*1*1*1*1")).await.unwrap();
        other.follow_up.expect("booking action").await.unwrap();
        assert_eq!(gateway.sent().len(), 2);
        assert!(gateway.sent()[1].1.contains("Ref APT0002"), "{}", gateway.sent()[1].1);
    }

    #[tokio::test]
    async fn test_screen_does_not_wait_for_gateway() {
        let gateway = Arc::new(HeldGateway::default());
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        let service = UssdService::new(SessionStore::new(Duration::from_secs(180)), store, gateway.clone());

        let reply = tokio::time::timeout(
            Duration::from_secs(1),
            service.respond(&request("s6", "4*1*1")),
        )
        .await
        .expect("screen returned while the send is pending")
        .unwrap();
        assert!(reply.screen.is_end());
        assert_eq!(gateway.sent.load(Ordering::SeqCst), 0);

        gateway.release.notify_one();
        reply.follow_up.expect("follow-up action").await.unwrap();
        assert_eq!(gateway.sent.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_leaf_follow_up() {
        let (service, _, gateway) = service();
        let reply = service.respond(&request("s3", "4*1*1")).await.unwrap();
        assert_eq!(
            reply.screen.to_string(),
            "END Thank you. You will receive an SMS with details about Medical."
        );
        reply.follow_up.expect("follow-up action").await.unwrap();
        assert!(gateway.sent()[0].1.contains("ALERT MEDICAL"));
    }

    #[tokio::test]
    async fn test_missing_session_id() {
        let (service, _, _) = service();
        assert!(matches!(
            service.handle(&request(" ", "")).await,
            Err(ServiceError::InvalidRequest(_))
        ));
    }
}
