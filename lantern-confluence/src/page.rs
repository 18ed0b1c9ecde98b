//! # Page Links
//!
//! Locating a Confluence page from whatever a Jira field holds: a bare URL,
//! text with a URL in it, or an object carrying the URL in `url` or `value`.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use url::Url;

static EMBEDDED_URL_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r#"(?i)https?://[^\s"'<>]+"#).expect("Failed to compile embedded URL regex"));

static PAGE_ID_PARAM_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"pageId=(\d+)").expect("Failed to compile page id parameter regex"));

static PAGE_ID_PATH_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"pages/(\d+)").expect("Failed to compile page id path regex"));

/// Find a page URL in a field value.
pub fn extract_url(value: &Value) -> Option<String> {
  match value {
    Value::Null => None,
    Value::String(text) => find_embedded_url(text),
    Value::Object(object) => ["url", "value"]
      .iter()
      .filter_map(|key| object.get(*key))
      .find_map(|candidate| match candidate {
        Value::String(text) => find_embedded_url(text),
        _ => None,
      })
      .or_else(|| find_embedded_url(&value.to_string())),
    other => find_embedded_url(&other.to_string()),
  }
}

fn find_embedded_url(text: &str) -> Option<String> {
  EMBEDDED_URL_REGEX.find(text).map(|found| found.as_str().to_string())
}

/// Extract the numeric page id from a page URL.
///
/// Handles both `viewpage.action?pageId=123` and `/pages/123/Title` forms.
pub fn extract_page_id(url: &str) -> Option<String> {
  PAGE_ID_PARAM_REGEX
    .captures(url)
    .or_else(|| PAGE_ID_PATH_REGEX.captures(url))
    .and_then(|captures| captures.get(1))
    .map(|id| id.as_str().to_string())
}

/// Derive the REST base URL from a page URL.
///
/// Cloud instances serve Confluence under `/wiki`; self-hosted ones usually
/// serve it at the root.
pub fn base_url_from_page(page_url: &str) -> Option<String> {
  let url = Url::parse(page_url).ok()?;
  if !url.has_host() {
    return None;
  }

  let origin = url.origin().ascii_serialization();
  if url.path().starts_with("/wiki/") {
    Some(format!("{origin}/wiki"))
  } else {
    Some(origin)
  }
}
