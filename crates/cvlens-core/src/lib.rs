//! Core library for cvlens: configuration, session credentials, the service
//! client, upload admission, and analysis outcome reduction.

pub mod analysis;
pub mod config;
pub mod credentials;
pub mod error;
pub mod logging;
pub mod service;
pub mod session;
pub mod upload;
