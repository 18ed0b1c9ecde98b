//! Failures while summarizing a page.
//!
//! These never leave the crate as errors: the client renders them into
//! [`crate::SummaryResult::error`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfluenceError {
  #[error("No valid URL provided")]
  NoUrl,

  #[error("Could not extract page ID from URL")]
  NoPageId,

  #[error("Could not determine the Confluence base URL for {0}")]
  NoBaseUrl(String),

  #[error("Confluence request timed out")]
  Timeout,

  #[error("Failed to reach Confluence: {0}")]
  Network(String),

  #[error("Confluence returned HTTP {status}")]
  Http { status: u16 },

  #[error("Unexpected response from Confluence: {0}")]
  Malformed(String),
}

impl From<reqwest::Error> for ConfluenceError {
  fn from(err: reqwest::Error) -> Self {
    if err.is_timeout() {
      ConfluenceError::Timeout
    } else if err.is_decode() {
      ConfluenceError::Malformed(err.to_string())
    } else {
      ConfluenceError::Network(err.to_string())
    }
  }
}
