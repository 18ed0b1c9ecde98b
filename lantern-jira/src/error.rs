//! # Jira Errors
//!
//! Failures surfaced by [`crate::JiraClient`]. Each variant maps onto the HTTP
//! status the dashboard facade answers with.

use reqwest::StatusCode;
use thiserror::Error;

use crate::consts::MAX_ERROR_BODY_CHARS;

#[derive(Debug, Error)]
pub enum JiraError {
  /// Every authentication strategy was tried and none produced a JSON payload.
  #[error("All authentication methods failed. Last error: {last_error}")]
  AuthExhausted {
    last_error: String,
    /// At least one strategy was answered with 401 or 403.
    auth_rejected: bool,
  },

  /// Jira answered 200 with HTML or a body that isn't the expected JSON.
  #[error("Malformed response from Jira: {0}")]
  MalformedResponse(String),

  #[error("Jira returned HTTP {status}: {message}")]
  Http { status: u16, message: String },

  #[error("Issue {0} not found")]
  NotFound(String),

  /// Rejected before any request was made.
  #[error("Invalid issue key: {0}")]
  InvalidIssueKey(String),

  #[error("Network error while contacting Jira: {0}")]
  Network(String),

  #[error("Request to Jira timed out: {0}")]
  Timeout(String),

  #[error("No Jira credentials configured")]
  NoCredentials,
}

impl JiraError {
  /// HTTP status the facade should answer with.
  pub fn status_code(&self) -> StatusCode {
    match self {
      JiraError::AuthExhausted { auth_rejected: true, .. } | JiraError::NoCredentials => StatusCode::UNAUTHORIZED,
      JiraError::AuthExhausted { .. } => StatusCode::INTERNAL_SERVER_ERROR,
      JiraError::MalformedResponse(_) | JiraError::Network(_) => StatusCode::BAD_GATEWAY,
      JiraError::Http { status, .. } => StatusCode::from_u16(*status)
        .ok()
        .filter(|code| code.is_client_error() || code.is_server_error())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
      JiraError::NotFound(_) => StatusCode::NOT_FOUND,
      JiraError::InvalidIssueKey(_) => StatusCode::BAD_REQUEST,
      JiraError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
    }
  }

  /// A short remediation hint for the user, if one applies.
  pub fn hint(&self) -> Option<&'static str> {
    match self {
      JiraError::AuthExhausted { .. } => Some("Check your Jira token or configured credentials."),
      JiraError::NoCredentials => Some("Set JIRA_PAT or JIRA_USERNAME and JIRA_PASSWORD."),
      JiraError::MalformedResponse(_) => Some("Jira returned a login page; the credentials were likely rejected."),
      JiraError::Network(_) => Some("Check your network connectivity and JIRA_BASE_URL."),
      JiraError::Timeout(_) => Some("Jira did not answer in time; try again or narrow the JQL query."),
      JiraError::InvalidIssueKey(_) => Some("Issue keys look like PROJ-123; numeric issue ids are also accepted."),
      JiraError::Http { .. } | JiraError::NotFound(_) => None,
    }
  }
}

/// Why a single request attempt failed.
///
/// The probe loop treats every variant as "try the next strategy"; once the
/// strategies are exhausted the attempt errors are folded into a [`JiraError`].
#[derive(Debug, Error)]
pub(crate) enum AttemptError {
  #[error("{0}")]
  Transport(#[from] reqwest::Error),

  #[error("HTTP {status}: {message}")]
  Status { status: StatusCode, message: String },

  #[error("{0}")]
  Malformed(String),
}

impl AttemptError {
  /// The attempt never received an HTTP response.
  pub(crate) fn is_transport(&self) -> bool {
    matches!(self, AttemptError::Transport(_))
  }

  /// Jira explicitly refused the credentials.
  pub(crate) fn is_auth_rejection(&self) -> bool {
    matches!(
      self,
      AttemptError::Status {
        status: StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN,
        ..
      }
    )
  }
}

impl From<AttemptError> for JiraError {
  fn from(err: AttemptError) -> Self {
    match err {
      AttemptError::Transport(source) if source.is_timeout() => JiraError::Timeout(source.to_string()),
      AttemptError::Transport(source) => JiraError::Network(source.to_string()),
      AttemptError::Status { status, message } => JiraError::Http {
        status: status.as_u16(),
        message,
      },
      AttemptError::Malformed(message) => JiraError::MalformedResponse(message),
    }
  }
}

/// Condense an error body into a single readable line.
///
/// Jira's JSON errors carry `errorMessages`; anything else is truncated text.
pub(crate) fn summarize_error_body(body: &str) -> String {
  let trimmed = body.trim();
  if trimmed.is_empty() {
    return "empty response body".to_string();
  }

  if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed)
    && let Some(messages) = value.get("errorMessages").and_then(|m| m.as_array())
  {
    let joined = messages.iter().filter_map(|m| m.as_str()).collect::<Vec<_>>().join("; ");
    if !joined.is_empty() {
      return joined;
    }
  }

  if looks_like_html(trimmed) {
    return "HTML error page".to_string();
  }

  let mut summary: String = trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect();
  if trimmed.chars().count() > MAX_ERROR_BODY_CHARS {
    summary.push_str("...");
  }
  summary
}

/// Whether a body is an HTML document (typically a login page redirect).
pub(crate) fn looks_like_html(body: &str) -> bool {
  let head: String = body.trim_start().chars().take(512).collect::<String>().to_ascii_lowercase();
  head.contains("<!doctype") || head.contains("<html")
}
