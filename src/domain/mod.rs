//! Domain layer - Core business objects with no infrastructure dependencies
//!
//! This layer contains:
//! - Entities: Records the service reads and writes (reminders, alerts, ...)
//! - Traits: Abstractions for infrastructure (Store, Gateway)

pub mod entities;
pub mod traits;
