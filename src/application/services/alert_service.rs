use serde::Deserialize;
use std::sync::Arc;

use crate::application::errors::ServiceError;
use crate::domain::entities::Alert;
use crate::domain::traits::{DeliveryReport, Gateway, Store};

/// Dashboard alert submission
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertRequest {
    pub phone_number: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub location: String,
    #[serde(default)]
    pub details: String,
}

/// Records emergency alerts and broadcasts them by SMS
pub struct AlertService {
    store: Arc<dyn Store>,
    gateway: Arc<dyn Gateway>,
}

impl AlertService {
    pub fn new(store: Arc<dyn Store>, gateway: Arc<dyn Gateway>) -> Self {
        Self { store, gateway }
    }

    /// Store the alert and send it to the reporter and every subscriber of
    /// the location. The report is `None` when the broadcast failed; the
    /// alert stays recorded.
    pub async fn send(
        &self,
        request: &AlertRequest,
    ) -> Result<(Alert, Option<DeliveryReport>), ServiceError> {
        if request.phone_number.trim().is_empty() || request.location.trim().is_empty() {
            return Err(ServiceError::InvalidRequest(
                "phoneNumber and location are required".to_string(),
            ));
        }

        let mut alert = Alert::new(
            request.phone_number.trim(),
            request.kind.trim(),
            request.location.trim(),
            request.details.trim(),
        );
        alert.id = self.store.save_alert(&alert).await?;

        let mut recipients = vec![alert.phone.clone()];
        for subscriber in self.store.alert_subscribers(&alert.location.to_uppercase()).await? {
            if !recipients.contains(&subscriber) {
                recipients.push(subscriber);
            }
        }

        tracing::info!(
            "Broadcasting alert {} ({}) to {} recipient(s)",
            alert.reference(),
            alert.kind,
            recipients.len()
        );
        let report = match self.gateway.send_sms(&recipients, &alert.broadcast_text()).await {
            Ok(report) => Some(report),
            Err(e) => {
                tracing::error!("Broadcast of alert {} failed: {}", alert.reference(), e);
                None
            }
        };
        Ok((alert, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::errors::GatewayError;
    use crate::infrastructure::database::SqliteStore;
    use crate::infrastructure::gateway::ConsoleGateway;
    use async_trait::async_trait;

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

    fn flood() -> AlertRequest {
        AlertRequest {
            phone_number: "+254700000001".to_string(),
            kind: "Flood".to_string(),
            location: "Nairobi".to_string(),
            details: "River burst its banks".to_string(),
        }
    }

    #[tokio::test]
    async fn test_alert_reaches_reporter_and_subscribers() {
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        store.set_alert_subscription("+254700000002", "NAIROBI", true).await.unwrap();
        let gateway = Arc::new(ConsoleGateway::new());
        let service = AlertService::new(store, gateway.clone());

        let (alert, report) = service.send(&flood()).await.unwrap();

        assert_eq!(alert.reference(), "ALT0001");
        assert_eq!(report.unwrap().recipients.len(), 2);
        let sent = gateway.sent();
        assert_eq!(sent[0].0, vec!["+254700000001".to_string(), "+254700000002".to_string()]);
        assert_eq!(sent[0].1, "Emergency Alert: Flood\nLocation: Nairobi\nDetails: River burst its banks");
    }

    #[tokio::test]
    async fn test_failed_broadcast_records_alert_once() {
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        let service = AlertService::new(store, Arc::new(OfflineGateway));

        let (alert, report) = service.send(&flood()).await.unwrap();
        assert!(report.is_none());
        assert_eq!(alert.reference(), "ALT0001");

        // The next alert gets the next id, so nothing was rolled back or duplicated
        let (next, _) = service.send(&flood()).await.unwrap();
        assert_eq!(next.reference(), "ALT0002");
    }

    #[tokio::test]
    async fn test_missing_location_rejected() {
        let service = AlertService::new(
            Arc::new(SqliteStore::in_memory().unwrap()),
            Arc::new(ConsoleGateway::new()),
        );
        let result = service
            .send(&AlertRequest {
                phone_number: "+254700000001".to_string(),
                kind: "Flood".to_string(),
                location: " ".to_string(),
                details: String::new(),
            })
            .await;
        assert!(matches!(result, Err(ServiceError::InvalidRequest(_))));
    }
}
