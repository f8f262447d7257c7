//! Outbound SMS gateways

pub mod africastalking;
pub mod console;

pub use africastalking::{AfricasTalkingConfig, AfricasTalkingGateway};
pub use console::ConsoleGateway;
