//! Constants for the lantern-jira client.

use std::time::Duration;

/// User-Agent header value for the Jira API client
pub const USER_AGENT: &str = concat!("lantern/", env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Timeout applied to token-based (bearer and PAT header) requests
pub const TOKEN_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Largest page requested from the search endpoint
pub const SEARCH_PAGE_SIZE: usize = 100;

/// Longest upstream error body carried into an error message
pub const MAX_ERROR_BODY_CHARS: usize = 200;
