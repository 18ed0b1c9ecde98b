//! # Lantern Core Library
//!
//! Shared building blocks for the lantern dashboard server: the startup
//! configuration, the column schema that drives the table, and the field
//! projector that reshapes raw Jira issues into display rows.

pub mod columns;
pub mod config;
pub mod consts;
pub mod projector;
pub mod url;

// Re-export main types for the client and server crates
pub use columns::{ColumnDefinition, ColumnSchema, ColumnType};
pub use config::{ConfigDirs, ConfigError, ConfluenceSettings, DashboardConfig, JiraSettings, ServerSettings};
pub use projector::{FormattedRow, IssueRecord, check_label, format_column, format_value, project, project_issue, resolve};
