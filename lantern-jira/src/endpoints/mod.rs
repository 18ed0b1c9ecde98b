//! # Jira API Endpoints
//!
//! Endpoint implementations grouped by Jira resource. Each module extends
//! [`crate::JiraClient`] with an `impl` block.

pub mod issues;
pub mod myself;
pub mod search;
