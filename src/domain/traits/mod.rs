//! Domain traits - Abstractions for infrastructure implementations

pub mod gateway;
pub mod store;

pub use gateway::{DeliveryReport, Gateway, RecipientStatus};
pub use store::Store;
