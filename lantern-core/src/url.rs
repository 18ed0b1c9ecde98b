//! URL helpers shared across crates.
//!
//! Base URLs arrive from environment variables and config files in whatever
//! shape the operator typed them. These helpers normalize them once at startup
//! so the clients can build endpoint URLs with plain `format!`.

use anyhow::Result;
use url::{Position, Url};

/// Render a parsed base URL without a trailing slash.
fn normalize_base_url(url: &Url) -> String {
  let mut result = String::new();
  result.push_str(&url[..Position::BeforePath]);
  result.push_str(url.path().trim_end_matches('/'));

  if let Some(query) = url.query() {
    result.push('?');
    result.push_str(query);
  }

  result
}

/// Parse `input` as a host (plus optional path) by prefixing `https://`.
fn parse_with_https_prefix(input: &str) -> Result<Url> {
  let with_scheme = format!("https://{input}");
  Url::parse(&with_scheme).map_err(|_| anyhow::anyhow!("Failed to parse URL: '{input}'. Ensure it has a valid scheme."))
}

/// Ensure a base URL has a proper scheme (http:// or https://).
///
/// If the input doesn't include a scheme, assumes https://. Malformed schemes
/// like `https:/jira.example.com` are repaired, and a trailing slash is dropped
/// so callers can append `/rest/...` paths directly.
pub fn ensure_url_scheme(input: &str) -> Result<String> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Err(anyhow::anyhow!("Host cannot be empty"));
  }

  let lowered = trimmed.to_ascii_lowercase();
  for scheme in ["http:", "https:"] {
    if lowered.starts_with(scheme) && !lowered.starts_with(&format!("{scheme}//")) {
      let remainder = &trimmed[scheme.len()..];
      return parse_with_https_prefix(remainder.trim_start_matches('/')).map(|url| normalize_base_url(&url));
    }
  }

  let url = match Url::parse(trimmed) {
    Ok(url) if url.has_host() => url,
    _ => parse_with_https_prefix(trimmed)?,
  };

  Ok(normalize_base_url(&url))
}

/// Whether a string already looks like an absolute http(s) URL.
pub fn is_http_url(value: &str) -> bool {
  let lowered = value.trim_start().to_ascii_lowercase();
  lowered.starts_with("http://") || lowered.starts_with("https://")
}

/// Build the browser link for an issue key.
pub fn browse_url(base_url: &str, key: &str) -> String {
  format!("{}/browse/{}", base_url.trim_end_matches('/'), key)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_ensure_url_scheme_with_https() {
    let result = ensure_url_scheme("https://jira.example.com").unwrap();
    assert_eq!(result, "https://jira.example.com");
  }

  #[test]
  fn test_ensure_url_scheme_with_http() {
    let result = ensure_url_scheme("http://jira.example.com").unwrap();
    assert_eq!(result, "http://jira.example.com");
  }

  #[test]
  fn test_ensure_url_scheme_without_scheme() {
    let result = ensure_url_scheme("jira.example.com").unwrap();
    assert_eq!(result, "https://jira.example.com");
  }

  #[test]
  fn test_ensure_url_scheme_strips_trailing_slash() {
    let result = ensure_url_scheme("https://jira.example.com/").unwrap();
    assert_eq!(result, "https://jira.example.com");

    let result = ensure_url_scheme("https://example.com/jira/").unwrap();
    assert_eq!(result, "https://example.com/jira");
  }

  #[test]
  fn test_ensure_url_scheme_empty_string() {
    let result = ensure_url_scheme("   ");
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Host cannot be empty"));
  }

  #[test]
  fn test_ensure_url_scheme_with_port() {
    let result = ensure_url_scheme("localhost:8080").unwrap();
    assert_eq!(result, "https://localhost:8080");

    let result = ensure_url_scheme("http://127.0.0.1:8080").unwrap();
    assert_eq!(result, "http://127.0.0.1:8080");
  }

  #[test]
  fn test_ensure_url_scheme_case_sensitivity() {
    let result = ensure_url_scheme("HTTPS://jira.example.com").unwrap();
    assert_eq!(result, "https://jira.example.com");
  }

  #[test]
  fn test_ensure_url_scheme_partial_scheme() {
    let result = ensure_url_scheme("https:/jira.example.com").unwrap();
    assert_eq!(result, "https://jira.example.com");

    let result = ensure_url_scheme("http:/jira.example.com").unwrap();
    assert_eq!(result, "https://jira.example.com");
  }

  #[test]
  fn test_is_http_url() {
    assert!(is_http_url("https://wiki.example.com/pages/1"));
    assert!(is_http_url("HTTP://wiki.example.com"));
    assert!(!is_http_url("wiki.example.com"));
    assert!(!is_http_url("ftp://example.com"));
  }

  #[test]
  fn test_browse_url() {
    assert_eq!(
      browse_url("https://jira.example.com/", "PROJ-1"),
      "https://jira.example.com/browse/PROJ-1"
    );
  }
}
