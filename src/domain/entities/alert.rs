use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A community emergency alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: i64,
    pub phone: String,
    pub kind: String,
    pub location: String,
    pub details: String,
    pub created_at: DateTime<Utc>,
}

impl Alert {
    pub fn new(
        phone: impl Into<String>,
        kind: impl Into<String>,
        location: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            phone: phone.into(),
            kind: kind.into(),
            location: location.into(),
            details: details.into(),
            created_at: Utc::now(),
        }
    }

    /// Public reference, e.g. `ALT0042`
    pub fn reference(&self) -> String {
        format!("ALT{:04}", self.id)
    }

    /// Text broadcast to subscribers of the alert's location
    pub fn broadcast_text(&self) -> String {
        format!(
            "Emergency Alert: {}\nLocation: {}\nDetails: {}",
            self.kind, self.location, self.details
        )
    }
}
