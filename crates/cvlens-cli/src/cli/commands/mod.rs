//! CLI command handlers.

pub mod analyze;
pub mod auth;
pub mod config;
pub mod health;
