//! # Jira User Endpoint
//!
//! Token validation against `/rest/api/2/myself`.

use tracing::{info, instrument};

use crate::auth::AuthStrategy;
use crate::client::{JiraClient, read_json};
use crate::error::{AttemptError, JiraError};
use crate::models::{JiraUser, TokenInfo};

impl JiraClient {
  /// Check that `token` is accepted by Jira and report whose it is.
  ///
  /// When `email` is given, the result says whether it matches the account.
  #[instrument(skip(self, token), level = "debug")]
  pub async fn test_token(&self, token: &str, email: Option<&str>) -> Result<TokenInfo, JiraError> {
    let strategy = AuthStrategy::Bearer {
      token: token.trim().to_string(),
    };
    let url = format!("{}/rest/api/2/myself", self.base_url);

    let response = strategy
      .apply(self.client.get(&url))
      .send()
      .await
      .map_err(AttemptError::from)?;
    let user = read_json::<JiraUser>(response).await?;

    info!("Token belongs to {}", user.name.as_deref().unwrap_or("<unnamed user>"));
    Ok(TokenInfo::new(user, email))
  }
}

#[cfg(test)]
mod tests {
  use lantern_test_utils::fixtures::myself;
  use wiremock::matchers::{header, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use crate::client::JiraClient;
  use crate::error::JiraError;
  use crate::models::JiraAuth;

  #[tokio::test]
  async fn test_token_valid() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = JiraClient::new(&mock_server.uri(), JiraAuth::default());

    Mock::given(method("GET"))
      .and(path("/rest/api/2/myself"))
      .and(header("Authorization", "Bearer user_token"))
      .respond_with(ResponseTemplate::new(200).set_body_json(myself("jdoe", "jane.doe@example.com")))
      .expect(1)
      .mount(&mock_server)
      .await;

    let info = client.test_token("user_token", Some("JANE.DOE@example.com")).await?;

    assert_eq!(info.user.name.as_deref(), Some("jdoe"));
    assert_eq!(info.user.display_name.as_deref(), Some("Jane Doe"));
    assert_eq!(info.email_matches, Some(true));
    Ok(())
  }

  #[tokio::test]
  async fn test_token_rejected() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = JiraClient::new(&mock_server.uri(), JiraAuth::default());

    Mock::given(method("GET"))
      .and(path("/rest/api/2/myself"))
      .respond_with(ResponseTemplate::new(401))
      .mount(&mock_server)
      .await;

    let err = client.test_token("bad_token", None).await.unwrap_err();
    assert!(matches!(err, JiraError::Http { status: 401, .. }));
    assert_eq!(err.status_code(), reqwest::StatusCode::UNAUTHORIZED);
    Ok(())
  }
}
