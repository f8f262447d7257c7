use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether an entry asks for a resource or offers one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Request,
    Offer,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Request => "request",
            ResourceKind::Offer => "offer",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "request" => Some(ResourceKind::Request),
            "offer" => Some(ResourceKind::Offer),
            _ => None,
        }
    }

    /// The kind an entry of this kind is matched against
    pub fn counterpart(&self) -> Self {
        match self {
            ResourceKind::Request => ResourceKind::Offer,
            ResourceKind::Offer => ResourceKind::Request,
        }
    }
}

/// A community resource request or offer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceEntry {
    pub id: i64,
    pub kind: ResourceKind,
    pub phone: String,
    pub resource: String,
    pub location: String,
    pub open: bool,
    pub created_at: DateTime<Utc>,
}

impl ResourceEntry {
    pub fn new(
        kind: ResourceKind,
        phone: impl Into<String>,
        resource: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            kind,
            phone: phone.into(),
            resource: resource.into(),
            location: location.into(),
            open: true,
            created_at: Utc::now(),
        }
    }

    /// One-line summary used in SMS replies
    pub fn summary(&self) -> String {
        format!("{} in {}", self.resource, self.location)
    }
}
