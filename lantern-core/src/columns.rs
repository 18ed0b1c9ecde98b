//! # Column Schema
//!
//! The dashboard table is driven by an ordered list of column definitions.
//! Each definition names the output key the browser sees, the dotted path of
//! the Jira field it reads, and how the raw value is formatted for display.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Output keys every formatted row carries regardless of the schema.
pub const RESERVED_OUTPUT_KEYS: [&str; 2] = ["key", "url"];

/// How a column's raw field value is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnType {
  /// Calendar date (`M/D/YYYY`).
  Date,
  /// Date and time (`M/D/YYYY, h:mm:ss AM`).
  Datetime,
  /// Short status-like label; missing values render as `Unknown`.
  Badge,
  /// Hyperlink target.
  Link,
  /// Confluence page link, resolved to a summary on demand by the UI.
  Confluence,
  /// `Yes`/`No` depending on whether a label is present.
  LabelCheck,
  /// Plain text; unknown type names fall back to this.
  #[default]
  #[serde(other)]
  Text,
}

/// A single configured column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDefinition {
  /// Key of the value in each formatted row.
  #[serde(default, alias = "output_key")]
  pub output_key: String,
  /// Dotted path into the issue's field bag (e.g. `status.name`).
  #[serde(default, alias = "source_field_path")]
  pub source_field_path: String,
  #[serde(rename = "type", default)]
  pub column_type: ColumnType,
  /// Label looked up by [`ColumnType::LabelCheck`] columns.
  #[serde(default, alias = "label_to_check", skip_serializing_if = "Option::is_none")]
  pub label_to_check: Option<String>,
  /// Column header shown by the UI; defaults to the output key.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub label: Option<String>,
}

impl ColumnDefinition {
  /// Create a column with no label check and the default header.
  pub fn new(output_key: impl Into<String>, source_field_path: impl Into<String>, column_type: ColumnType) -> Self {
    Self {
      output_key: output_key.into(),
      source_field_path: source_field_path.into(),
      column_type,
      label_to_check: None,
      label: None,
    }
  }

  /// Set the header shown by the UI.
  pub fn with_label(mut self, label: impl Into<String>) -> Self {
    self.label = Some(label.into());
    self
  }

  /// Set the label a [`ColumnType::LabelCheck`] column looks for.
  pub fn with_label_to_check(mut self, label: impl Into<String>) -> Self {
    self.label_to_check = Some(label.into());
    self
  }

  /// Whether the definition can be applied to an issue.
  ///
  /// Entries with an empty output key or field path are malformed, and so are
  /// entries that would shadow the always-present `key`/`url` values.
  pub fn is_applicable(&self) -> bool {
    let key = self.output_key.trim();
    !key.is_empty() && !self.source_field_path.trim().is_empty() && !RESERVED_OUTPUT_KEYS.contains(&key)
  }

  /// Top-level Jira field this column needs in the search response.
  pub fn jira_field(&self) -> &str {
    let path = self.source_field_path.trim();
    path.split('.').next().unwrap_or(path)
  }
}

/// Errors raised when a user selects columns that don't exist.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColumnSelectionError {
  #[error("Unknown column '{0}'")]
  UnknownColumn(String),
  #[error("At least one column must be selected")]
  Empty,
}

/// An ordered, validated set of columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ColumnSchema {
  columns: Vec<ColumnDefinition>,
}

impl Default for ColumnSchema {
  fn default() -> Self {
    Self::new(Self::default_columns())
  }
}

impl ColumnSchema {
  /// Build a schema, silently skipping malformed and duplicate entries.
  pub fn new(definitions: impl IntoIterator<Item = ColumnDefinition>) -> Self {
    let mut seen = HashSet::new();
    let columns = definitions
      .into_iter()
      .filter(|column| {
        if !column.is_applicable() {
          debug!("Skipping malformed column definition: {:?}", column);
          return false;
        }
        if !seen.insert(column.output_key.clone()) {
          debug!("Skipping duplicate column '{}'", column.output_key);
          return false;
        }
        true
      })
      .collect();

    Self { columns }
  }

  /// Columns shipped when no config file declares any.
  pub fn default_columns() -> Vec<ColumnDefinition> {
    vec![
      ColumnDefinition::new("summary", "summary", ColumnType::Text).with_label("Summary"),
      ColumnDefinition::new("issueType", "issuetype.name", ColumnType::Badge).with_label("Type"),
      ColumnDefinition::new("status", "status", ColumnType::Badge).with_label("Status"),
      ColumnDefinition::new("priority", "priority", ColumnType::Badge).with_label("Priority"),
      ColumnDefinition::new("assignee", "assignee", ColumnType::Text).with_label("Assignee"),
      ColumnDefinition::new("reporter", "reporter", ColumnType::Text).with_label("Reporter"),
      ColumnDefinition::new("created", "created", ColumnType::Date).with_label("Created"),
      ColumnDefinition::new("updated", "updated", ColumnType::Datetime).with_label("Updated"),
      ColumnDefinition::new("dueDate", "duedate", ColumnType::Date).with_label("Due"),
      ColumnDefinition::new("fixVersions", "fixVersions", ColumnType::Text).with_label("Fix Versions"),
      ColumnDefinition::new("labels", "labels", ColumnType::Text).with_label("Labels"),
      ColumnDefinition::new("blocked", "labels", ColumnType::LabelCheck)
        .with_label("Blocked")
        .with_label_to_check("blocked"),
    ]
  }

  pub fn columns(&self) -> &[ColumnDefinition] {
    &self.columns
  }

  pub fn len(&self) -> usize {
    self.columns.len()
  }

  pub fn is_empty(&self) -> bool {
    self.columns.is_empty()
  }

  /// Output keys in schema order.
  pub fn output_keys(&self) -> Vec<&str> {
    self.columns.iter().map(|column| column.output_key.as_str()).collect()
  }

  /// Jira fields the schema needs, de-duplicated in first-seen order.
  pub fn jira_fields(&self) -> Vec<String> {
    let mut seen = HashSet::new();
    self
      .columns
      .iter()
      .map(ColumnDefinition::jira_field)
      .filter(|field| seen.insert(*field))
      .map(str::to_string)
      .collect()
  }

  /// Pick a subset of columns, in the order given by `keys`.
  pub fn select<S: AsRef<str>>(&self, keys: &[S]) -> Result<ColumnSchema, ColumnSelectionError> {
    if keys.is_empty() {
      return Err(ColumnSelectionError::Empty);
    }

    let columns = keys
      .iter()
      .map(|key| {
        let key = key.as_ref();
        self
          .columns
          .iter()
          .find(|column| column.output_key == key)
          .cloned()
          .ok_or_else(|| ColumnSelectionError::UnknownColumn(key.to_string()))
      })
      .collect::<Result<Vec<_>, _>>()?;

    Ok(Self::new(columns))
  }
}
