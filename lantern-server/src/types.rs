//! Request and response bodies for the dashboard API.
//!
//! Successful responses are wrapped in [`Success`], which adds
//! `"success": true` next to the payload's own fields.

use std::collections::BTreeMap;

use lantern_confluence::SummaryResult;
use lantern_core::{ColumnDefinition, FormattedRow};
use lantern_jira::{JiraIssue, TokenInfo};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `{ "success": true, ...payload }`
#[derive(Debug, Serialize)]
pub struct Success<T: Serialize> {
  pub success: bool,
  #[serde(flatten)]
  pub data: T,
}

impl<T: Serialize> Success<T> {
  pub fn new(data: T) -> Self {
    Self { success: true, data }
  }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// `?jql=` on the issue list endpoints
#[derive(Debug, Default, Deserialize)]
pub struct JqlQuery {
  pub jql: Option<String>,
}

/// `?url=` on the single summary endpoint
#[derive(Debug, Default, Deserialize)]
pub struct SummaryQuery {
  pub url: Option<String>,
}

/// Body of `POST /api/save-column-config`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveColumnsRequest {
  pub user_columns: Vec<ColumnChoice>,
}

/// A chosen column: a bare output key or a definition carrying one
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ColumnChoice {
  Key(String),
  #[serde(rename_all = "camelCase")]
  Definition {
    output_key: String,
  },
}

impl ColumnChoice {
  pub fn output_key(&self) -> &str {
    match self {
      ColumnChoice::Key(key) | ColumnChoice::Definition { output_key: key } => key.trim(),
    }
  }
}

/// Body of `POST /api/test-token`
#[derive(Debug, Default, Deserialize)]
pub struct TestTokenRequest {
  #[serde(default)]
  pub token: Option<String>,
  #[serde(default)]
  pub email: Option<String>,
}

/// Body of `POST /api/confluence/summaries`
#[derive(Debug, Default, Deserialize)]
pub struct SummariesRequest {
  #[serde(default)]
  pub urls: Vec<Value>,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Projected search results
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuesResponse {
  pub jql: String,
  /// Matches reported by Jira, which may exceed `issues.len()`
  pub total: usize,
  pub count: usize,
  pub columns: Vec<ColumnDefinition>,
  pub issues: Vec<FormattedRow>,
}

/// A single issue, raw and projected
#[derive(Debug, Serialize)]
pub struct IssueDetailResponse {
  pub issue: JiraIssue,
  pub row: FormattedRow,
}

/// The active display columns
#[derive(Debug, Serialize)]
pub struct TableConfigResponse {
  pub columns: Vec<ColumnDefinition>,
}

/// Full column schema and the non-secret settings
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendConfigResponse {
  pub columns: Vec<ColumnDefinition>,
  pub display_columns: Vec<String>,
  pub jira_base_url: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub confluence_base_url: Option<String>,
  pub default_jql: String,
  pub max_results: usize,
  pub has_pat: bool,
  pub has_basic_auth: bool,
  pub has_confluence_token: bool,
}

/// Outcome of a token check
#[derive(Debug, Serialize)]
pub struct TestTokenResponse {
  pub user: TokenInfo,
}

/// Batch summaries keyed by the link as sent
#[derive(Debug, Serialize)]
pub struct SummariesResponse {
  pub summaries: BTreeMap<String, SummaryResult>,
}

/// Liveness probe
#[derive(Debug, Serialize)]
pub struct HealthResponse {
  pub status: &'static str,
  pub timestamp: String,
  pub version: &'static str,
}
