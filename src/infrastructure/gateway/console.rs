//! Console gateway for local development and tests

use async_trait::async_trait;
use std::sync::Mutex;

use crate::application::errors::GatewayError;
use crate::domain::traits::{DeliveryReport, Gateway, RecipientStatus};

/// Prints outbound SMS instead of sending them and keeps a copy
#[derive(Default)]
pub struct ConsoleGateway {
    sent: Mutex<Vec<(Vec<String>, String)>>,
}

impl ConsoleGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages sent so far as (recipients, text)
    pub fn sent(&self) -> Vec<(Vec<String>, String)> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Gateway for ConsoleGateway {
    fn name(&self) -> &str {
        "console"
    }

    async fn send_sms(
        &self,
        recipients: &[String],
        message: &str,
    ) -> Result<DeliveryReport, GatewayError> {
        tracing::info!("[SMS -> {}] {}", recipients.join(","), message);
        if let Ok(mut sent) = self.sent.lock() {
            sent.push((recipients.to_vec(), message.to_string()));
        }
        Ok(DeliveryReport {
            message: format!("Sent to {}/{}", recipients.len(), recipients.len()),
            recipients: recipients
                .iter()
                .map(|number| RecipientStatus {
                    number: number.clone(),
                    status: "Success".to_string(),
                    message_id: None,
                    cost: None,
                })
                .collect(),
        })
    }
}
