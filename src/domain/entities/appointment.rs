use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A booked health appointment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub phone: String,
    pub facility: String,
    pub service: String,
    pub date: String,
    pub time: String,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    pub fn new(
        phone: impl Into<String>,
        facility: impl Into<String>,
        service: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            phone: phone.into(),
            facility: facility.into(),
            service: service.into(),
            date: date.into(),
            time: time.into(),
            created_at: Utc::now(),
        }
    }

    pub fn confirmation_text(&self) -> String {
        format!(
            "Ujamaa Health: your {} appointment ({}) is booked for {}, {}. Ref APT{:04}.",
            self.service, self.facility, self.date, self.time, self.id
        )
    }
}
