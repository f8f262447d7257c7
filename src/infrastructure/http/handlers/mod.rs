pub mod alerts;
pub mod chat;
pub mod community;
pub mod health;
pub mod reminders;
pub mod sms;
pub mod tips;
pub mod ussd;
pub mod voice;
