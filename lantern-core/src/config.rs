//! # Configuration Management
//!
//! Resolves the dashboard's startup configuration from, in increasing order of
//! precedence: built-in defaults, a TOML config file, a `.env` file and the
//! process environment. The result is an immutable [`DashboardConfig`] that the
//! server builds once and shares with every request.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::columns::{ColumnDefinition, ColumnSchema};
use crate::consts::*;
use crate::url::ensure_url_scheme;

/// Errors that make the configuration unusable. All of them are fatal at
/// startup.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Jira base URL is not configured. Set JIRA_BASE_URL or `base_url` in the [jira] config section")]
  MissingBaseUrl,
  #[error("No Jira credentials configured. Set JIRA_PAT, or JIRA_USERNAME together with JIRA_PASSWORD")]
  MissingCredentials,
  #[error("Invalid value for {name}: {message}")]
  InvalidValue { name: String, message: String },
  #[error("Failed to determine project directories")]
  NoProjectDirs,
  #[error("Failed to read config file {}", .path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
  #[error("Failed to parse config file {}", .path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },
  #[error("Failed to write {}", .path.display())]
  Write {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
  #[error("Invalid user column selection")]
  UserColumns(#[from] serde_json::Error),
}

/// Represents the configuration directories for the lantern application
#[derive(Debug, Clone)]
pub struct ConfigDirs {
  pub config_dir: PathBuf,
  pub data_dir: PathBuf,
}

impl ConfigDirs {
  /// Create a new ConfigDirs instance from the platform's project dirs
  pub fn new() -> Result<Self, ConfigError> {
    let proj_dirs = ProjectDirs::from("dev", "", "lantern").ok_or(ConfigError::NoProjectDirs)?;

    Ok(Self {
      config_dir: proj_dirs.config_dir().to_path_buf(),
      data_dir: proj_dirs.data_dir().to_path_buf(),
    })
  }

  /// Create a ConfigDirs instance rooted at explicit paths
  pub fn from_paths(config_dir: impl Into<PathBuf>, data_dir: impl Into<PathBuf>) -> Self {
    Self {
      config_dir: config_dir.into(),
      data_dir: data_dir.into(),
    }
  }

  /// Get the path to the default TOML config file
  pub fn config_path(&self) -> PathBuf {
    self.config_dir.join(CONFIG_FILE_NAME)
  }

  /// Get the path to the persisted display column selection
  pub fn user_columns_path(&self) -> PathBuf {
    self.data_dir.join(USER_COLUMNS_FILE_NAME)
  }

  /// Load the saved display column selection, if one exists
  pub fn load_user_columns(&self) -> Result<Option<Vec<String>>, ConfigError> {
    let path = self.user_columns_path();
    if !path.exists() {
      return Ok(None);
    }

    let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
      path: path.clone(),
      source,
    })?;
    let saved: SavedColumns = serde_json::from_str(&content)?;

    Ok(Some(saved.user_columns))
  }

  /// Persist the display column selection
  pub fn save_user_columns(&self, keys: &[String]) -> Result<(), ConfigError> {
    let path = self.user_columns_path();
    let write_err = |source| ConfigError::Write {
      path: path.clone(),
      source,
    };

    fs::create_dir_all(&self.data_dir).map_err(write_err)?;
    let content = serde_json::to_string_pretty(&SavedColumns {
      user_columns: keys.to_vec(),
    })?;
    fs::write(&path, content).map_err(write_err)?;

    Ok(())
  }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SavedColumns {
  user_columns: Vec<String>,
}

/// On-disk TOML layout. Every value is optional; the environment fills gaps.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
  pub jira: JiraFileSection,
  pub confluence: ConfluenceFileSection,
  pub server: ServerFileSection,
  pub columns: Option<Vec<ColumnDefinition>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JiraFileSection {
  pub base_url: Option<String>,
  pub pat: Option<String>,
  pub username: Option<String>,
  pub password: Option<String>,
  pub email_domain: Option<String>,
  pub default_jql: Option<String>,
  pub max_results: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfluenceFileSection {
  pub base_url: Option<String>,
  pub token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerFileSection {
  pub host: Option<String>,
  pub port: Option<u16>,
  pub development: Option<bool>,
}

impl FileConfig {
  /// Read and parse a TOML config file
  pub fn read(path: &Path) -> Result<Self, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;

    toml::from_str(&content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }
}

/// Jira connection settings
#[derive(Debug, Clone)]
pub struct JiraSettings {
  /// Normalized base URL without a trailing slash
  pub base_url: String,
  pub pat: Option<String>,
  pub username: Option<String>,
  pub password: Option<String>,
  /// Domain appended to bare usernames when probing basic auth
  pub email_domain: String,
  pub default_jql: String,
  pub max_results: usize,
}

impl JiraSettings {
  pub fn has_basic_credentials(&self) -> bool {
    self.username.is_some() && self.password.is_some()
  }

  pub fn has_credentials(&self) -> bool {
    self.pat.is_some() || self.has_basic_credentials()
  }
}

/// Confluence connection settings
#[derive(Debug, Clone, Default)]
pub struct ConfluenceSettings {
  /// Base URL; derived from each page URL when unset
  pub base_url: Option<String>,
  pub token: Option<String>,
}

/// HTTP server settings
#[derive(Debug, Clone)]
pub struct ServerSettings {
  pub host: String,
  pub port: u16,
  /// Include full error chains in API error responses
  pub development: bool,
}

impl Default for ServerSettings {
  fn default() -> Self {
    Self {
      host: DEFAULT_HOST.to_string(),
      port: DEFAULT_PORT,
      development: false,
    }
  }
}

/// Fully resolved dashboard configuration
#[derive(Debug, Clone)]
pub struct DashboardConfig {
  pub jira: JiraSettings,
  pub confluence: ConfluenceSettings,
  pub server: ServerSettings,
  /// Every configured column; the display selection is a subset of these
  pub columns: ColumnSchema,
  pub dirs: ConfigDirs,
}

impl DashboardConfig {
  /// Load configuration from `.env`, the config file and the environment.
  ///
  /// The config file is `explicit_path` when given, else `$LANTERN_CONFIG`,
  /// else `lantern.toml` in the project config directory if it exists.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
    if let Err(err) = dotenvy::dotenv()
      && !err.not_found()
    {
      warn!("Ignoring unreadable .env file: {}", err);
    }

    let dirs = ConfigDirs::new()?;
    let env_path = std::env::var(ENV_LANTERN_CONFIG)
      .ok()
      .filter(|value| !value.trim().is_empty())
      .map(PathBuf::from);

    let file = match explicit_path.map(Path::to_path_buf).or(env_path) {
      Some(path) => FileConfig::read(&path)?,
      None => {
        let default_path = dirs.config_path();
        if default_path.exists() {
          FileConfig::read(&default_path)?
        } else {
          debug!("No config file at {}, using defaults", default_path.display());
          FileConfig::default()
        }
      }
    };

    Self::from_sources(file, |name| std::env::var(name).ok(), dirs)
  }

  /// Merge a parsed config file with environment lookups.
  ///
  /// Non-empty environment values win over file values.
  pub fn from_sources<F>(file: FileConfig, env: F, dirs: ConfigDirs) -> Result<Self, ConfigError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let non_empty = |value: String| {
      let trimmed = value.trim();
      (!trimmed.is_empty()).then(|| trimmed.to_string())
    };
    let lookup = |names: &[&str], fallback: Option<String>| -> Option<String> {
      names
        .iter()
        .find_map(|name| env(name).and_then(non_empty))
        .or_else(|| fallback.and_then(non_empty))
    };

    let raw_base_url =
      lookup(&[ENV_JIRA_BASE_URL, ENV_JIRA_HOST], file.jira.base_url).ok_or(ConfigError::MissingBaseUrl)?;
    let base_url = normalize_url(ENV_JIRA_BASE_URL, &raw_base_url)?;

    let max_results = match lookup(&[ENV_JIRA_MAX_RESULTS], None) {
      Some(raw) => parse_number(ENV_JIRA_MAX_RESULTS, &raw)?,
      None => file.jira.max_results.unwrap_or(DEFAULT_MAX_RESULTS),
    };
    if max_results == 0 {
      return Err(ConfigError::InvalidValue {
        name: ENV_JIRA_MAX_RESULTS.to_string(),
        message: "must be greater than zero".to_string(),
      });
    }

    let jira = JiraSettings {
      base_url,
      pat: lookup(&[ENV_JIRA_PAT], file.jira.pat),
      username: lookup(&[ENV_JIRA_USERNAME], file.jira.username),
      password: lookup(&[ENV_JIRA_PASSWORD, ENV_JIRA_API_TOKEN], file.jira.password),
      email_domain: lookup(&[ENV_JIRA_EMAIL_DOMAIN], file.jira.email_domain)
        .map(|domain| domain.trim_start_matches('@').to_string())
        .unwrap_or_else(|| DEFAULT_EMAIL_DOMAIN.to_string()),
      default_jql: lookup(&[ENV_JIRA_DEFAULT_JQL], file.jira.default_jql).unwrap_or_else(|| DEFAULT_JQL.to_string()),
      max_results,
    };

    if !jira.has_credentials() {
      return Err(ConfigError::MissingCredentials);
    }

    let confluence = ConfluenceSettings {
      base_url: lookup(&[ENV_CONFLUENCE_BASE_URL], file.confluence.base_url)
        .map(|raw| normalize_url(ENV_CONFLUENCE_BASE_URL, &raw))
        .transpose()?,
      token: lookup(&[ENV_CONFLUENCE_TOKEN], file.confluence.token),
    };

    let port = match lookup(&[ENV_LANTERN_PORT, ENV_PORT], None) {
      Some(raw) => parse_number(ENV_LANTERN_PORT, &raw)?,
      None => file.server.port.unwrap_or(DEFAULT_PORT),
    };
    let development = match lookup(&[ENV_LANTERN_ENV], None) {
      Some(raw) => raw.eq_ignore_ascii_case("development"),
      None => file.server.development.unwrap_or(false),
    };
    let server = ServerSettings {
      host: lookup(&[ENV_LANTERN_HOST], file.server.host).unwrap_or_else(|| DEFAULT_HOST.to_string()),
      port,
      development,
    };

    let columns = match file.columns {
      Some(definitions) => {
        let schema = ColumnSchema::new(definitions);
        if schema.is_empty() {
          warn!("Config file declares no usable columns, falling back to the default schema");
          ColumnSchema::default()
        } else {
          schema
        }
      }
      None => ColumnSchema::default(),
    };

    Ok(Self {
      jira,
      confluence,
      server,
      columns,
      dirs,
    })
  }

  /// The display column selection: the saved user choice when it is still
  /// valid against the configured columns, otherwise every column.
  pub fn initial_display_columns(&self) -> ColumnSchema {
    match self.dirs.load_user_columns() {
      Ok(Some(keys)) => match self.columns.select(&keys) {
        Ok(schema) => schema,
        Err(err) => {
          warn!("Ignoring saved column selection: {}", err);
          self.columns.clone()
        }
      },
      Ok(None) => self.columns.clone(),
      Err(err) => {
        warn!("Failed to load saved column selection: {}", err);
        self.columns.clone()
      }
    }
  }
}

fn normalize_url(name: &str, raw: &str) -> Result<String, ConfigError> {
  ensure_url_scheme(raw).map_err(|err| ConfigError::InvalidValue {
    name: name.to_string(),
    message: err.to_string(),
  })
}

fn parse_number<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, ConfigError>
where
  T::Err: std::fmt::Display,
{
  raw.parse::<T>().map_err(|err| ConfigError::InvalidValue {
    name: name.to_string(),
    message: format!("'{raw}': {err}"),
  })
}
