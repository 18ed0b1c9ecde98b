//! # API Errors
//!
//! Every failed request answers with `{ "success": false, "error": ... }`.
//! The HTTP status mirrors the upstream failure class, and `details` carries
//! the full error only when the server runs in development mode.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use lantern_core::ConfigError;
use lantern_jira::JiraError;
use serde::Serialize;

pub const MISSING_TOKEN_MESSAGE: &str =
  "No authentication token provided. Please supply a Jira token in the x-jira-token header.";

/// An error rendered as the JSON error envelope
#[derive(Debug)]
pub struct ApiError {
  pub status: StatusCode,
  pub message: String,
  pub hint: Option<String>,
  pub details: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
  success: bool,
  error: &'a str,
  #[serde(skip_serializing_if = "Option::is_none")]
  hint: Option<&'a str>,
  #[serde(skip_serializing_if = "Option::is_none")]
  details: Option<&'a str>,
}

impl ApiError {
  pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
    Self {
      status,
      message: message.into(),
      hint: None,
      details: None,
    }
  }

  pub fn bad_request(message: impl Into<String>) -> Self {
    Self::new(StatusCode::BAD_REQUEST, message)
  }

  pub fn missing_token() -> Self {
    Self::new(StatusCode::UNAUTHORIZED, MISSING_TOKEN_MESSAGE)
  }

  /// Map a Jira failure, keeping the debug form only in development mode.
  pub fn from_jira(err: &JiraError, development: bool) -> Self {
    Self {
      status: err.status_code(),
      message: err.to_string(),
      hint: err.hint().map(str::to_string),
      details: development.then(|| format!("{err:?}")),
    }
  }

  /// Map a failure to persist settings.
  pub fn from_config(err: &ConfigError, development: bool) -> Self {
    Self {
      status: StatusCode::INTERNAL_SERVER_ERROR,
      message: err.to_string(),
      hint: None,
      details: development.then(|| format!("{err:?}")),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let body = ErrorBody {
      success: false,
      error: &self.message,
      hint: self.hint.as_deref(),
      details: self.details.as_deref(),
    };
    (self.status, Json(body)).into_response()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_from_jira_hides_details_outside_development() {
    let err = JiraError::Timeout("operation timed out".into());

    let production = ApiError::from_jira(&err, false);
    assert_eq!(production.status, StatusCode::GATEWAY_TIMEOUT);
    assert!(production.details.is_none());
    assert!(production.hint.is_some());

    let development = ApiError::from_jira(&err, true);
    assert!(development.details.unwrap().contains("Timeout"));
  }

  #[test]
  fn test_auth_exhausted_maps_to_unauthorized() {
    let err = JiraError::AuthExhausted {
      last_error: "HTTP 403 Forbidden: nope".into(),
      auth_rejected: true,
    };
    let api = ApiError::from_jira(&err, false);
    assert_eq!(api.status, StatusCode::UNAUTHORIZED);
    assert!(api.message.starts_with("All authentication methods failed"));
  }
}
