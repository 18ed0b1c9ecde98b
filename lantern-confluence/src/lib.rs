//! # Confluence Summary Client
//!
//! Resolves Confluence page links found in Jira fields to short plain-text
//! summaries. Failures never escape as errors; each lookup produces a
//! [`SummaryResult`] describing what happened.

pub mod client;
pub mod consts;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod page;
pub mod summary;

// Re-export the client
pub use client::ConfluenceClient;
pub use error::ConfluenceError;
// Re-export models
pub use models::{ConfluenceAuth, ContentPage, SummaryResult};
