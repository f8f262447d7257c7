use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::errors::GatewayError;

/// Gateway trait - abstraction for the outbound SMS provider
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &str;

    /// Send one text to one or more recipients
    async fn send_sms(&self, recipients: &[String], message: &str)
        -> Result<DeliveryReport, GatewayError>;
}

/// Per-recipient delivery status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientStatus {
    pub number: String,
    pub status: String,
    pub message_id: Option<String>,
    pub cost: Option<String>,
}

/// Provider response for a send request
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryReport {
    pub message: String,
    pub recipients: Vec<RecipientStatus>,
}

impl DeliveryReport {
    pub fn delivered(&self) -> usize {
        self.recipients
            .iter()
            .filter(|r| r.status.eq_ignore_ascii_case("success"))
            .count()
    }
}
