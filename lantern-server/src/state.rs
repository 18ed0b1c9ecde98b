//! Shared server state available to all handlers.

use std::sync::Arc;

use lantern_confluence::ConfluenceClient;
use lantern_core::columns::ColumnSelectionError;
use lantern_core::{ColumnSchema, ConfigError, DashboardConfig};
use lantern_jira::JiraClient;
use tokio::sync::RwLock;
use tokio::task::JoinError;
use tracing::info;

/// Why a column selection could not be saved
#[derive(Debug)]
pub enum SaveColumnsError {
  Invalid(ColumnSelectionError),
  Persist(ConfigError),
  Task(JoinError),
}

/// Shared state; configuration is immutable after startup.
pub struct AppState {
  pub config: Arc<DashboardConfig>,
  pub jira: JiraClient,
  pub confluence: ConfluenceClient,
  /// The user's chosen subset and order of columns
  display_columns: RwLock<ColumnSchema>,
}

impl AppState {
  pub fn new(config: DashboardConfig) -> Self {
    let jira = JiraClient::from_settings(&config.jira);
    let confluence = ConfluenceClient::from_settings(&config.confluence, config.jira.pat.as_deref());
    let display_columns = RwLock::new(config.initial_display_columns());

    Self {
      config: Arc::new(config),
      jira,
      confluence,
      display_columns,
    }
  }

  pub fn development(&self) -> bool {
    self.config.server.development
  }

  /// Every configured column
  pub fn all_columns(&self) -> &ColumnSchema {
    &self.config.columns
  }

  pub async fn display_columns(&self) -> ColumnSchema {
    self.display_columns.read().await.clone()
  }

  /// Validate, persist and activate a new display selection.
  pub async fn save_display_columns(&self, keys: &[String]) -> Result<ColumnSchema, SaveColumnsError> {
    let selection = self.config.columns.select(keys).map_err(SaveColumnsError::Invalid)?;

    let output_keys: Vec<String> = selection.output_keys().into_iter().map(str::to_string).collect();
    let summary = output_keys.join(", ");
    let dirs = self.config.dirs.clone();

    // Held across the write so disk and memory change together.
    let mut active = self.display_columns.write().await;
    tokio::task::spawn_blocking(move || dirs.save_user_columns(&output_keys))
      .await
      .map_err(SaveColumnsError::Task)?
      .map_err(SaveColumnsError::Persist)?;
    *active = selection.clone();

    info!("Saved display columns: {}", summary);
    Ok(selection)
  }
}
