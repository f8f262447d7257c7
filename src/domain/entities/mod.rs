//! Domain entities - Core business objects with no external dependencies

pub mod alert;
pub mod appointment;
pub mod message;
pub mod reminder;
pub mod resource;
pub mod volunteer;

pub use alert::Alert;
pub use appointment::Appointment;
pub use message::{Channel, InboundMessage};
pub use reminder::{Reminder, TipFrequency};
pub use resource::{ResourceEntry, ResourceKind};
pub use volunteer::{Organization, Volunteer, VolunteerPost};
