//! # Pulseboard Config
//!
//! Configuration management for Pulseboard.
//! Supports layered configuration from files, environment variables,
//! and runtime refresh.

mod app_config;
mod client_mode;
mod loader;

pub use app_config::*;
pub use client_mode::*;
pub use loader::*;
