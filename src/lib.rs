//! Ujamaa community health gateway: USSD menus, SMS commands, voice IVR,
//! chat and the dashboard API behind one axum server.

pub mod application;
pub mod domain;
pub mod infrastructure;
