use serde::{Deserialize, Serialize};

/// A registered volunteer, keyed by phone number
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Volunteer {
    pub phone: String,
    pub name: Option<String>,
    pub skills: Option<String>,
    pub location: Option<String>,
    pub availability: Option<String>,
}

impl Volunteer {
    pub fn new(phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            ..Default::default()
        }
    }
}

/// An organisation that posts volunteer needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub phone: String,
    pub name: String,
}

/// A volunteer opportunity posted by an organisation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolunteerPost {
    pub id: i64,
    /// Phone that posted it; only this sender may update or close it
    pub organization_phone: String,
    pub organization: String,
    pub need: String,
    pub location: String,
    pub details: String,
    pub open: bool,
}

impl VolunteerPost {
    /// Public reference, e.g. `POST7`
    pub fn reference(&self) -> String {
        format!("POST{}", self.id)
    }

    /// Parse a public reference back into a row id
    pub fn parse_reference(reference: &str) -> Option<i64> {
        reference
            .trim()
            .to_uppercase()
            .strip_prefix("POST")
            .and_then(|id| id.parse().ok())
    }
}
