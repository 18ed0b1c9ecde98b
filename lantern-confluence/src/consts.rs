//! Constants for the lantern-confluence client.

use std::time::Duration;

/// User-Agent header value for the Confluence API client
pub const USER_AGENT: &str = concat!("lantern/", env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Timeout for a single page fetch
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Delay between the starts of consecutive fetches in a batch
pub const BATCH_STAGGER: Duration = Duration::from_millis(100);

/// Length of the fallback summary taken from the start of the page
pub const FALLBACK_SUMMARY_CHARS: usize = 500;
