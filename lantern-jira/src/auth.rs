//! # Authentication Strategies
//!
//! Jira deployments disagree about how a personal access token should be
//! presented, and basic-auth usernames are sometimes the bare login and
//! sometimes the full email address. Rather than guessing, the client builds an
//! ordered list of [`AuthStrategy`] values and tries them one at a time until a
//! request comes back as JSON.

use std::collections::HashSet;

use reqwest::RequestBuilder;
use reqwest::header::AUTHORIZATION;

use crate::consts::TOKEN_REQUEST_TIMEOUT;
use crate::models::JiraAuth;

/// Header carrying a personal access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatHeader {
  /// `Authorization: Bearer <pat>`
  Bearer,
  /// `Authorization: Token <pat>`
  Token,
  /// `X-Auth-Token: <pat>`
  XAuthToken,
}

impl PatHeader {
  pub const ALL: [PatHeader; 3] = [PatHeader::Bearer, PatHeader::Token, PatHeader::XAuthToken];
}

/// One way of authenticating a request.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthStrategy {
  /// Token supplied by the dashboard user.
  Bearer { token: String },
  /// Configured personal access token in one of the supported headers.
  Pat { header: PatHeader, token: String },
  /// Configured username and password/API token.
  Basic { username: String, password: String },
}

impl AuthStrategy {
  /// Build the strategies to probe, in priority order.
  ///
  /// A caller token short-circuits everything else: only the bearer strategy
  /// is returned so the user's own identity is never silently swapped for the
  /// server's configured credentials.
  pub fn candidates(auth: &JiraAuth, token: Option<&str>) -> Vec<AuthStrategy> {
    if let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) {
      return vec![AuthStrategy::Bearer {
        token: token.to_string(),
      }];
    }

    let mut strategies = Vec::new();

    if let Some(pat) = auth.pat.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
      strategies.extend(PatHeader::ALL.iter().map(|header| AuthStrategy::Pat {
        header: *header,
        token: pat.to_string(),
      }));
    }

    if let (Some(username), Some(password)) = (auth.username.as_deref(), auth.password.as_deref()) {
      strategies.extend(
        basic_usernames(username, &auth.email_domain)
          .into_iter()
          .map(|username| AuthStrategy::Basic {
            username,
            password: password.to_string(),
          }),
      );
    }

    strategies
  }

  /// Whether this strategy presents a token rather than a password.
  pub fn is_token_based(&self) -> bool {
    !matches!(self, AuthStrategy::Basic { .. })
  }

  /// Attach the credentials to a request.
  pub fn apply(&self, request: RequestBuilder) -> RequestBuilder {
    match self {
      AuthStrategy::Bearer { token }
      | AuthStrategy::Pat {
        header: PatHeader::Bearer,
        token,
      } => request.bearer_auth(token).timeout(TOKEN_REQUEST_TIMEOUT),
      AuthStrategy::Pat {
        header: PatHeader::Token,
        token,
      } => request
        .header(AUTHORIZATION, format!("Token {token}"))
        .timeout(TOKEN_REQUEST_TIMEOUT),
      AuthStrategy::Pat {
        header: PatHeader::XAuthToken,
        token,
      } => request.header("X-Auth-Token", token).timeout(TOKEN_REQUEST_TIMEOUT),
      AuthStrategy::Basic { username, password } => request.basic_auth(username, Some(password)),
    }
  }

  /// A log-safe description of the strategy.
  pub fn describe(&self) -> String {
    match self {
      AuthStrategy::Bearer { .. } => "caller bearer token".to_string(),
      AuthStrategy::Pat { header, .. } => match header {
        PatHeader::Bearer => "PAT via Authorization: Bearer".to_string(),
        PatHeader::Token => "PAT via Authorization: Token".to_string(),
        PatHeader::XAuthToken => "PAT via X-Auth-Token".to_string(),
      },
      AuthStrategy::Basic { username, .. } => format!("basic auth as '{username}'"),
    }
  }
}

impl std::fmt::Debug for AuthStrategy {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.describe())
  }
}

/// Usernames to try for basic auth, de-duplicated in first-seen order.
///
/// The bare username comes first, then the username with the email domain
/// appended, then the "smart" form: the local part of an email-style username,
/// or the suffixed form for a bare one.
pub fn basic_usernames(username: &str, email_domain: &str) -> Vec<String> {
  let bare = username.trim();
  if bare.is_empty() {
    return Vec::new();
  }

  let domain = email_domain.trim().trim_start_matches('@');
  let suffixed = if bare.contains('@') || domain.is_empty() {
    bare.to_string()
  } else {
    format!("{bare}@{domain}")
  };
  let smart = match bare.split_once('@') {
    Some((local, _)) if !local.is_empty() => local.to_string(),
    _ => suffixed.clone(),
  };

  let mut seen = HashSet::new();
  [bare.to_string(), suffixed, smart]
    .into_iter()
    .filter(|candidate| seen.insert(candidate.clone()))
    .collect()
}
