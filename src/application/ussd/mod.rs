//! USSD channel - menu state machine, screens and session handling

pub mod menu;
pub mod screen;
pub mod service;

pub use menu::{advance, replay, UssdAction, UssdOutcome, UssdState};
pub use screen::Screen;
pub use service::{UssdReply, UssdRequest, UssdService, UssdSession};
