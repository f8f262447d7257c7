//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: YAML and environment configuration
//! - Database: SQLite persistence
//! - Gateway: Outbound SMS providers
//! - Http: axum routes for the gateway callbacks and dashboard
//! - LLM: Chat completion clients
//! - Session: TTL session store

pub mod config;
pub mod database;
pub mod gateway;
pub mod http;
pub mod llm;
pub mod session;
