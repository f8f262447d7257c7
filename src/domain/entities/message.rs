use chrono::{DateTime, Utc};
use std::fmt;

/// Channel a message arrived on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Sms,
    Ussd,
    Voice,
    Chat,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Sms => "sms",
            Channel::Ussd => "ussd",
            Channel::Voice => "voice",
            Channel::Chat => "chat",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents an incoming message from a phone or chat user
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub id: String,
    pub sender: String,
    pub text: String,
    pub channel: Channel,
    pub session_id: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl InboundMessage {
    pub fn new(channel: Channel, sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            sender: sender.into(),
            text: text.into(),
            channel,
            session_id: None,
            timestamp: Utc::now(),
        }
    }

    pub fn sms(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(Channel::Sms, sender, text)
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Short preview for log lines
    pub fn preview(&self) -> String {
        self.text.chars().take(50).collect()
    }
}
