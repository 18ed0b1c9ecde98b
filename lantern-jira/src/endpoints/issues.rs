//! # Jira Issue Endpoints
//!
//! Single-issue lookups. These use the primary strategy only (caller token,
//! else the configured PAT) rather than the full fallback probe.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::StatusCode;
use tracing::instrument;

use crate::auth::AuthStrategy;
use crate::client::{JiraClient, read_json};
use crate::error::{AttemptError, JiraError};
use crate::models::JiraIssue;

/// `PROJ-123` style keys or numeric issue ids
static ISSUE_KEY_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^(?:[A-Za-z][A-Za-z0-9_]*-\d+|\d+)$").expect("Failed to compile issue key regex"));

impl JiraClient {
  /// Get a Jira issue by key
  #[instrument(skip(self, token), level = "debug")]
  pub async fn get_issue_details(&self, issue_key: &str, token: Option<&str>) -> Result<JiraIssue, JiraError> {
    if !ISSUE_KEY_REGEX.is_match(issue_key) {
      return Err(JiraError::InvalidIssueKey(issue_key.to_string()));
    }

    let strategy = AuthStrategy::candidates(&self.auth, token)
      .into_iter()
      .next()
      .ok_or(JiraError::NoCredentials)?;
    let url = format!("{}/rest/api/2/issue/{}", self.base_url, issue_key);

    let response = strategy
      .apply(self.client.get(&url))
      .send()
      .await
      .map_err(AttemptError::from)?;

    match response.status() {
      StatusCode::NOT_FOUND | StatusCode::GONE => Err(JiraError::NotFound(issue_key.to_string())),
      _ => Ok(read_json::<JiraIssue>(response).await?),
    }
  }
}
