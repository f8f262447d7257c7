//! Africa's Talking bulk SMS API

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::application::errors::GatewayError;
use crate::domain::traits::{DeliveryReport, Gateway, RecipientStatus};

const LIVE_URL: &str = "https://api.africastalking.com/version1/messaging";
const SANDBOX_URL: &str = "https://api.sandbox.africastalking.com/version1/messaging";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct AfricasTalkingConfig {
    pub username: String,
    pub api_key: String,
    /// Alphanumeric sender id; omitted when unset
    pub sender_id: Option<String>,
    pub sandbox: bool,
}

impl Default for AfricasTalkingConfig {
    fn default() -> Self {
        Self {
            username: "sandbox".to_string(),
            api_key: String::new(),
            sender_id: None,
            sandbox: true,
        }
    }
}

impl AfricasTalkingConfig {
    pub fn endpoint(&self) -> &'static str {
        if self.sandbox || self.username == "sandbox" {
            SANDBOX_URL
        } else {
            LIVE_URL
        }
    }
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    #[serde(rename = "SMSMessageData")]
    data: MessageData,
}

#[derive(Debug, Deserialize)]
struct MessageData {
    #[serde(rename = "Message", default)]
    message: String,
    #[serde(rename = "Recipients", default)]
    recipients: Vec<ApiRecipient>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiRecipient {
    number: String,
    status: String,
    message_id: Option<String>,
    cost: Option<String>,
}

pub struct AfricasTalkingGateway {
    client: Client,
    config: AfricasTalkingConfig,
}

impl AfricasTalkingGateway {
    pub fn new(config: AfricasTalkingConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl Gateway for AfricasTalkingGateway {
    fn name(&self) -> &str {
        "africastalking"
    }

    async fn send_sms(
        &self,
        recipients: &[String],
        message: &str,
    ) -> Result<DeliveryReport, GatewayError> {
        if self.config.api_key.is_empty() {
            return Err(GatewayError::Auth("AT_API_KEY is not set".to_string()));
        }

        let to = recipients.join(",");
        let mut form = vec![
            ("username", self.config.username.as_str()),
            ("to", to.as_str()),
            ("message", message),
        ];
        if let Some(from) = self.config.sender_id.as_deref().filter(|s| !s.is_empty()) {
            form.push(("from", from));
        }

        let response = self
            .client
            .post(self.config.endpoint())
            .header("apiKey", &self.config.api_key)
            .header("Accept", "application/json")
            .form(&form)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(GatewayError::Auth(format!("Africa's Talking API error: {}", status)));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Rejected(format!("{}: {}", status, body)));
        }

        let parsed: SendResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Parse(e.to_string()))?;

        let report = DeliveryReport {
            message: parsed.data.message,
            recipients: parsed
                .data
                .recipients
                .into_iter()
                .map(|r| RecipientStatus {
                    number: r.number,
                    status: r.status,
                    message_id: r.message_id,
                    cost: r.cost,
                })
                .collect(),
        };
        tracing::debug!(
            "SMS to {} recipient(s): {} delivered ({})",
            recipients.len(),
            report.delivered(),
            report.message
        );
        Ok(report)
    }
}
