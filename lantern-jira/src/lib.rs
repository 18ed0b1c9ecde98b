//! # Jira API Client
//!
//! Jira REST integration for the dashboard: JQL search with authentication
//! fallback and pagination, single-issue lookups, and token validation.

pub mod auth;
mod client;
pub mod consts;
mod endpoints;
pub mod error;
pub mod models;

pub use auth::{AuthStrategy, PatHeader};
// Re-export the client
pub use client::JiraClient;
pub use error::JiraError;
// Re-export models
pub use models::{JiraAuth, JiraIssue, JiraUser, SearchResults, TokenInfo};
