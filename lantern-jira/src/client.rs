use lantern_core::JiraSettings;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::consts::{SEARCH_PAGE_SIZE, USER_AGENT};
use crate::error::{AttemptError, looks_like_html, summarize_error_body};
use crate::models::JiraAuth;

/// Represents a Jira API client
#[derive(Debug, Clone)]
pub struct JiraClient {
  pub(crate) client: Client,
  pub(crate) base_url: String,
  pub(crate) auth: JiraAuth,
  pub(crate) max_results: usize,
}

impl JiraClient {
  /// Create a new Jira client
  pub fn new(base_url: &str, auth: JiraAuth) -> Self {
    let client = Client::builder()
      .user_agent(USER_AGENT)
      .build()
      .unwrap_or_else(|_| Client::new());

    Self {
      client,
      base_url: base_url.trim_end_matches('/').to_string(),
      auth,
      max_results: SEARCH_PAGE_SIZE,
    }
  }

  /// Create a client from the resolved startup settings
  pub fn from_settings(settings: &JiraSettings) -> Self {
    Self::new(&settings.base_url, JiraAuth::from_settings(settings)).with_max_results(settings.max_results)
  }

  /// Cap the number of issues a single search collects
  pub fn with_max_results(mut self, max_results: usize) -> Self {
    self.max_results = max_results.max(1);
    self
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  pub fn max_results(&self) -> usize {
    self.max_results
  }
}

/// Read a 200 JSON response, rejecting anything else.
///
/// Jira answers unauthenticated requests with an HTML login page and status
/// 200 on some deployments, so the content type and body are checked too.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, AttemptError> {
  let status = response.status();
  let html_content_type = response
    .headers()
    .get(CONTENT_TYPE)
    .and_then(|value| value.to_str().ok())
    .is_some_and(|value| value.to_ascii_lowercase().contains("text/html"));

  let body = response.text().await?;

  if status != StatusCode::OK {
    return Err(AttemptError::Status {
      status,
      message: summarize_error_body(&body),
    });
  }

  if html_content_type {
    return Err(html_redirect());
  }

  serde_json::from_str(&body).map_err(|e| {
    if looks_like_html(&body) {
      html_redirect()
    } else {
      AttemptError::Malformed(format!("Invalid JSON in Jira response: {e}"))
    }
  })
}

fn html_redirect() -> AttemptError {
  AttemptError::Malformed("Received HTML instead of JSON, likely an authentication redirect".to_string())
}
