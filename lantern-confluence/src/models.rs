use serde::{Deserialize, Serialize};

/// Tokens the client falls back on when the caller supplies none
#[derive(Clone, Default)]
pub struct ConfluenceAuth {
  /// Confluence personal access token
  pub token: Option<String>,
  /// Jira PAT, used when Confluence shares Jira's identity provider
  pub fallback_token: Option<String>,
}

impl ConfluenceAuth {
  /// Pick the token for a request: caller's, then Confluence's, then Jira's.
  pub fn resolve<'a>(&'a self, caller_token: Option<&'a str>) -> Option<&'a str> {
    [caller_token, self.token.as_deref(), self.fallback_token.as_deref()]
      .into_iter()
      .flatten()
      .map(str::trim)
      .find(|token| !token.is_empty())
  }
}

impl std::fmt::Debug for ConfluenceAuth {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ConfluenceAuth")
      .field("token", &self.token.as_ref().map(|_| "<redacted>"))
      .field("fallback_token", &self.fallback_token.as_ref().map(|_| "<redacted>"))
      .finish()
  }
}

/// Outcome of summarizing one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResult {
  pub success: bool,
  pub summary: Option<String>,
  pub title: Option<String>,
  pub error: Option<String>,
}

impl SummaryResult {
  pub fn found(summary: Option<String>, title: Option<String>) -> Self {
    Self {
      success: true,
      summary,
      title,
      error: None,
    }
  }

  pub fn failed(error: impl Into<String>) -> Self {
    Self {
      success: false,
      summary: None,
      title: None,
      error: Some(error.into()),
    }
  }
}

/// A page from `/rest/api/content/{id}`
#[derive(Debug, Deserialize)]
pub struct ContentPage {
  #[serde(default)]
  pub id: String,
  #[serde(default)]
  pub title: Option<String>,
  #[serde(default)]
  pub body: Option<ContentBody>,
}

impl ContentPage {
  /// The storage-format markup, or an empty string when absent
  pub fn storage(&self) -> &str {
    self
      .body
      .as_ref()
      .and_then(|body| body.storage.as_ref())
      .map(|storage| storage.value.as_str())
      .unwrap_or_default()
  }
}

#[derive(Debug, Deserialize)]
pub struct ContentBody {
  #[serde(default)]
  pub storage: Option<StorageBody>,
}

#[derive(Debug, Deserialize)]
pub struct StorageBody {
  #[serde(default)]
  pub value: String,
}
