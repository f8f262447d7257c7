use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A medication or check-up reminder owned by a phone number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: i64,
    pub phone: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub time: Option<String>,
    pub days: Vec<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Reminder {
    pub fn new(phone: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: 0,
            phone: phone.into(),
            title: title.into(),
            kind: "medication".to_string(),
            time: None,
            days: Vec::new(),
            active: true,
            created_at: Utc::now(),
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    pub fn with_days(mut self, days: Vec<String>) -> Self {
        self.days = days;
        self
    }
}

/// Health tip subscription frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipFrequency {
    Daily,
    Weekly,
}

impl TipFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipFrequency::Daily => "daily",
            TipFrequency::Weekly => "weekly",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "daily" => Some(TipFrequency::Daily),
            "weekly" => Some(TipFrequency::Weekly),
            _ => None,
        }
    }
}

impl fmt::Display for TipFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
