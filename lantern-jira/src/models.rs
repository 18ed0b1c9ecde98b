use lantern_core::JiraSettings;
use lantern_core::projector::IssueRecord;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Credentials the client may fall back on when no caller token is supplied
#[derive(Clone, Default)]
pub struct JiraAuth {
  pub pat: Option<String>,
  pub username: Option<String>,
  pub password: Option<String>,
  /// Domain appended to bare usernames when probing basic auth
  pub email_domain: String,
}

impl JiraAuth {
  pub fn from_settings(settings: &JiraSettings) -> Self {
    Self {
      pat: settings.pat.clone(),
      username: settings.username.clone(),
      password: settings.password.clone(),
      email_domain: settings.email_domain.clone(),
    }
  }
}

impl std::fmt::Debug for JiraAuth {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("JiraAuth")
      .field("pat", &self.pat.as_ref().map(|_| "<redacted>"))
      .field("username", &self.username)
      .field("password", &self.password.as_ref().map(|_| "<redacted>"))
      .field("email_domain", &self.email_domain)
      .finish()
  }
}

/// Represents a Jira issue
///
/// The field bag is kept as raw JSON; its shape depends on the Jira instance
/// and is only ever read through the projector.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JiraIssue {
  #[serde(default, deserialize_with = "null_as_default")]
  pub id: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub key: String,
  #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
  pub self_url: Option<String>,
  #[serde(default)]
  pub fields: Value,
}

/// Treat an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl IssueRecord for JiraIssue {
  fn issue_key(&self) -> &str {
    &self.key
  }

  fn issue_fields(&self) -> &Value {
    &self.fields
  }
}

/// Request body for `POST /rest/api/2/search`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest<'a> {
  pub jql: &'a str,
  pub fields: &'a [String],
  pub start_at: usize,
  pub max_results: usize,
}

/// One page of search results as returned by Jira
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
  #[serde(default)]
  pub issues: Vec<JiraIssue>,
  #[serde(default)]
  pub total: usize,
  #[serde(default)]
  pub start_at: usize,
  #[serde(default)]
  pub max_results: usize,
}

/// The collected result of a (possibly paginated) search
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchResults {
  pub issues: Vec<JiraIssue>,
  /// Total matches reported by Jira, which may exceed `issues.len()`
  pub total: usize,
}

/// The account behind a token, from `/rest/api/2/myself`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraUser {
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub display_name: Option<String>,
  #[serde(default)]
  pub email_address: Option<String>,
}

/// Outcome of validating a bearer token
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
  #[serde(flatten)]
  pub user: JiraUser,
  /// Whether the supplied email matches the account; absent when none was given
  #[serde(skip_serializing_if = "Option::is_none")]
  pub email_matches: Option<bool>,
}

impl TokenInfo {
  pub fn new(user: JiraUser, email: Option<&str>) -> Self {
    let email_matches = email
      .map(str::trim)
      .filter(|email| !email.is_empty())
      .map(|email| {
        user
          .email_address
          .as_deref()
          .is_some_and(|address| address.trim().eq_ignore_ascii_case(email))
      });

    Self { user, email_matches }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn test_jira_issue_null_identifiers() {
    let issue: JiraIssue = serde_json::from_value(json!({
        "id": null,
        "key": null,
        "self": null,
        "fields": null
    }))
    .unwrap();

    assert_eq!(issue.id, "");
    assert_eq!(issue.key, "");
    assert_eq!(issue.self_url, None);
    assert!(issue.fields.is_null());

    let missing: JiraIssue = serde_json::from_value(json!({ "fields": {} })).unwrap();
    assert_eq!(missing.key, "");
  }

  #[test]
  fn test_jira_issue_deserialization() {
    let json = json!({
        "id": "10000",
        "key": "TEST-123",
        "self": "https://jira.example.com/rest/api/2/issue/10000",
        "fields": {
            "summary": "Test issue",
            "status": { "name": "In Progress" }
        }
    });

    let issue: JiraIssue = serde_json::from_value(json).unwrap();
    assert_eq!(issue.id, "10000");
    assert_eq!(issue.key, "TEST-123");
    assert_eq!(
      issue.self_url.as_deref(),
      Some("https://jira.example.com/rest/api/2/issue/10000")
    );
    assert_eq!(issue.fields["status"]["name"], "In Progress");
    assert_eq!(issue.issue_key(), "TEST-123");
  }

  #[test]
  fn test_jira_issue_tolerates_missing_parts() {
    let issue: JiraIssue = serde_json::from_value(json!({ "id": "1" })).unwrap();
    assert_eq!(issue.key, "");
    assert!(issue.fields.is_null());
  }

  #[test]
  fn test_search_request_serialization() {
    let fields = vec!["summary".to_string(), "status".to_string()];
    let request = SearchRequest {
      jql: "project = TEST",
      fields: &fields,
      start_at: 0,
      max_results: 50,
    };

    assert_eq!(
      serde_json::to_value(&request).unwrap(),
      json!({
          "jql": "project = TEST",
          "fields": ["summary", "status"],
          "startAt": 0,
          "maxResults": 50
      })
    );
  }

  #[test]
  fn test_token_info_email_match() {
    let user = JiraUser {
      name: Some("jdoe".into()),
      display_name: Some("Jane Doe".into()),
      email_address: Some("Jane.Doe@Example.com".into()),
    };

    assert_eq!(
      TokenInfo::new(user.clone(), Some("jane.doe@example.com")).email_matches,
      Some(true)
    );
    assert_eq!(TokenInfo::new(user.clone(), Some("other@example.com")).email_matches, Some(false));
    assert_eq!(TokenInfo::new(user, None).email_matches, None);
  }

  #[test]
  fn test_auth_debug_redacts_secrets() {
    let auth = JiraAuth {
      pat: Some("secret-pat".into()),
      username: Some("jdoe".into()),
      password: Some("hunter2".into()),
      email_domain: "example.com".into(),
    };

    let debug = format!("{auth:?}");
    assert!(!debug.contains("secret-pat"));
    assert!(!debug.contains("hunter2"));
    assert!(debug.contains("jdoe"));
  }
}
