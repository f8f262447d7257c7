//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Messaging: Normalisation, ordered command dispatch, rate limiting
//! - SMS / USSD / Voice / Chat: the channel interpreters
//! - Services: Dashboard use cases (alerts, reminders, tips, community)
//! - Errors: Layer-specific errors

pub mod chat;
pub mod errors;
pub mod messaging;
pub mod services;
pub mod sms;
pub mod ussd;
pub mod voice;
