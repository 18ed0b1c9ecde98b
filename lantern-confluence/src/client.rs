//! # Confluence HTTP Client
//!
//! Holds the HTTP client, the optional configured base URL and the fallback
//! tokens. The page lookups live in [`crate::endpoints`].

use lantern_core::ConfluenceSettings;
use reqwest::Client;

use crate::consts::{REQUEST_TIMEOUT, USER_AGENT};
use crate::models::ConfluenceAuth;
use crate::page::base_url_from_page;

/// Represents a Confluence API client
#[derive(Debug, Clone)]
pub struct ConfluenceClient {
  pub(crate) client: Client,
  pub(crate) base_url: Option<String>,
  pub(crate) auth: ConfluenceAuth,
}

impl ConfluenceClient {
  /// Create a new Confluence client
  ///
  /// Without a `base_url`, each request derives one from the page URL.
  pub fn new(base_url: Option<&str>, auth: ConfluenceAuth) -> Self {
    let client = Client::builder()
      .user_agent(USER_AGENT)
      .timeout(REQUEST_TIMEOUT)
      .build()
      .unwrap_or_else(|_| Client::new());

    Self {
      client,
      base_url: base_url
        .map(|url| url.trim().trim_end_matches('/').to_string())
        .filter(|url| !url.is_empty()),
      auth,
    }
  }

  /// Create a client from the resolved startup settings
  ///
  /// The Jira PAT is the last-resort token for Confluence requests.
  pub fn from_settings(settings: &ConfluenceSettings, jira_pat: Option<&str>) -> Self {
    let auth = ConfluenceAuth {
      token: settings.token.clone(),
      fallback_token: jira_pat.map(str::to_string),
    };
    Self::new(settings.base_url.as_deref(), auth)
  }

  pub fn base_url(&self) -> Option<&str> {
    self.base_url.as_deref()
  }

  /// REST base URL for a page: the configured one, else the page's own origin.
  pub(crate) fn api_base_for(&self, page_url: &str) -> Option<String> {
    self.base_url.clone().or_else(|| base_url_from_page(page_url))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_confluence_client_creation() {
    let client = ConfluenceClient::new(Some("https://wiki.example.com/"), ConfluenceAuth::default());
    assert_eq!(client.base_url(), Some("https://wiki.example.com"));

    let blank = ConfluenceClient::new(Some("  "), ConfluenceAuth::default());
    assert_eq!(blank.base_url(), None);
  }

  #[test]
  fn test_api_base_prefers_configured_url() {
    let configured = ConfluenceClient::new(Some("https://wiki.example.com"), ConfluenceAuth::default());
    assert_eq!(
      configured.api_base_for("https://other.example.com/wiki/pages/1").as_deref(),
      Some("https://wiki.example.com")
    );

    let derived = ConfluenceClient::new(None, ConfluenceAuth::default());
    assert_eq!(
      derived.api_base_for("https://other.example.com/wiki/pages/1").as_deref(),
      Some("https://other.example.com/wiki")
    );
  }

  #[test]
  fn test_from_settings_uses_jira_pat_as_fallback() {
    let settings = ConfluenceSettings {
      base_url: None,
      token: None,
    };
    let client = ConfluenceClient::from_settings(&settings, Some("jira-pat"));
    assert_eq!(client.auth.resolve(None), Some("jira-pat"));
  }
}
