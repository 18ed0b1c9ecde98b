//! Test utilities shared across the lantern workspace
//!
//! This crate provides common testing infrastructure including:
//! - Environment variable isolation ([`EnvVarGuard`])
//! - Temporary config and data directories ([`ConfigDirsTestGuard`])
//! - Jira and Confluence payload fixtures ([`fixtures`])
//!
//! The clippy dead_code lint is disabled for this crate because test utilities
//! may not be used by all tests, and the compiler cannot detect usage across
//! crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod config;
pub mod env;
pub mod fixtures;

// Re-export commonly used items
pub use config::ConfigDirsTestGuard;
pub use env::EnvVarGuard;
