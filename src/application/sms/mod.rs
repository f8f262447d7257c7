//! SMS channel - keyword classification and command execution

pub mod command;
pub mod service;
pub mod tips;

pub use command::{classify, sms_dispatcher, SmsCommand};
pub use service::SmsService;
pub use tips::TipCategory;
