//! Environment variable names and defaults shared across lantern components.

/// Jira base URL (e.g. `https://jira.example.com`).
pub const ENV_JIRA_BASE_URL: &str = "JIRA_BASE_URL";
/// Alternate name for the Jira base URL.
pub const ENV_JIRA_HOST: &str = "JIRA_HOST";
/// Jira personal access token.
pub const ENV_JIRA_PAT: &str = "JIRA_PAT";
/// Jira username for basic auth.
pub const ENV_JIRA_USERNAME: &str = "JIRA_USERNAME";
/// Jira password for basic auth.
pub const ENV_JIRA_PASSWORD: &str = "JIRA_PASSWORD";
/// Jira Cloud API token, accepted in place of a password.
pub const ENV_JIRA_API_TOKEN: &str = "JIRA_API_TOKEN";
/// Domain appended to bare usernames when probing basic auth.
pub const ENV_JIRA_EMAIL_DOMAIN: &str = "JIRA_EMAIL_DOMAIN";
/// JQL used when a request does not carry one.
pub const ENV_JIRA_DEFAULT_JQL: &str = "JIRA_DEFAULT_JQL";
/// Upper bound on the number of issues a single search collects.
pub const ENV_JIRA_MAX_RESULTS: &str = "JIRA_MAX_RESULTS";
/// Confluence base URL (e.g. `https://wiki.example.com`).
pub const ENV_CONFLUENCE_BASE_URL: &str = "CONFLUENCE_BASE_URL";
/// Confluence personal access token.
pub const ENV_CONFLUENCE_TOKEN: &str = "CONFLUENCE_TOKEN";
/// Interface the HTTP server binds to.
pub const ENV_LANTERN_HOST: &str = "LANTERN_HOST";
/// Port the HTTP server binds to.
pub const ENV_LANTERN_PORT: &str = "LANTERN_PORT";
/// Generic port variable honoured when `LANTERN_PORT` is unset.
pub const ENV_PORT: &str = "PORT";
/// Runtime environment; `development` enables verbose error details.
pub const ENV_LANTERN_ENV: &str = "LANTERN_ENV";
/// Explicit path to the TOML config file.
pub const ENV_LANTERN_CONFIG: &str = "LANTERN_CONFIG";

pub const DEFAULT_JQL: &str = "assignee = currentUser() AND resolution = Unresolved ORDER BY updated DESC";
pub const DEFAULT_EMAIL_DOMAIN: &str = "example.com";
pub const DEFAULT_MAX_RESULTS: usize = 1000;
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;

/// File name of the TOML config inside the project config directory.
pub const CONFIG_FILE_NAME: &str = "lantern.toml";
/// File name of the persisted display column selection.
pub const USER_COLUMNS_FILE_NAME: &str = "user_columns.json";
