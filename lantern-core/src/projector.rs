//! # Field Projector
//!
//! Reshapes raw Jira issues into display rows. Every lookup goes through
//! [`resolve`], which treats a missing or untraversable path as absent data
//! rather than an error, so a single odd issue can never break a whole table.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use crate::columns::{ColumnDefinition, ColumnType};
use crate::url::{browse_url, is_http_url};

const DATE_FORMAT: &str = "%-m/%-d/%Y";
const DATETIME_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";
const INVALID_DATE: &str = "Invalid Date";
const UNKNOWN_BADGE: &str = "Unknown";

static NULL: Value = Value::Null;

/// Anything the projector can read a key and a field bag from.
pub trait IssueRecord {
  fn issue_key(&self) -> &str;
  fn issue_fields(&self) -> &Value;
}

impl IssueRecord for Value {
  fn issue_key(&self) -> &str {
    self.get("key").and_then(Value::as_str).unwrap_or_default()
  }

  fn issue_fields(&self) -> &Value {
    self.get("fields").unwrap_or(&NULL)
  }
}

/// A display-ready table row.
///
/// Serializes as a JSON object with `key` and `url` first, followed by the
/// schema's columns in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedRow {
  pub key: String,
  pub url: String,
  pub columns: Vec<(String, String)>,
}

impl FormattedRow {
  /// Look up a value by output key, including `key` and `url`.
  pub fn get(&self, output_key: &str) -> Option<&str> {
    match output_key {
      "key" => Some(self.key.as_str()),
      "url" => Some(self.url.as_str()),
      _ => self
        .columns
        .iter()
        .find(|(name, _)| name == output_key)
        .map(|(_, value)| value.as_str()),
    }
  }

  /// All output keys in serialization order.
  pub fn keys(&self) -> Vec<&str> {
    ["key", "url"]
      .into_iter()
      .chain(self.columns.iter().map(|(name, _)| name.as_str()))
      .collect()
  }
}

impl Serialize for FormattedRow {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(self.columns.len() + 2))?;
    map.serialize_entry("key", &self.key)?;
    map.serialize_entry("url", &self.url)?;
    for (name, value) in &self.columns {
      map.serialize_entry(name, value)?;
    }
    map.end()
  }
}

/// Walk a dotted path through an issue's field bag.
///
/// Returns `None` when any segment is missing, when an intermediate value is
/// not an object, or when the final value is JSON `null`.
pub fn resolve<'a>(fields: &'a Value, path: &str) -> Option<&'a Value> {
  let mut current = fields;
  for segment in path.trim().split('.') {
    current = current.as_object()?.get(segment)?;
  }

  (!current.is_null()).then_some(current)
}

/// Format a resolved value for a column type.
///
/// Label checks need the label to look for; use [`format_column`] or
/// [`check_label`] for those. Called here without one they render `No`.
pub fn format_value(value: Option<&Value>, column_type: ColumnType) -> String {
  match column_type {
    ColumnType::Text => format_text(value),
    ColumnType::Date => format_timestamp(value, DATE_FORMAT),
    ColumnType::Datetime => format_timestamp(value, DATETIME_FORMAT),
    ColumnType::Badge => format_badge(value),
    ColumnType::Link | ColumnType::Confluence => format_link(value),
    ColumnType::LabelCheck => check_label(value, ""),
  }
}

/// Format a resolved value for a column definition.
pub fn format_column(value: Option<&Value>, column: &ColumnDefinition) -> String {
  match column.column_type {
    ColumnType::LabelCheck => check_label(value, column.label_to_check.as_deref().unwrap_or_default()),
    other => format_value(value, other),
  }
}

/// `Yes` when `value` carries `label`, compared case-insensitively.
///
/// Arrays match on whole entries (strings, or label objects with `name` or
/// `value`); a single string matches on substring.
pub fn check_label(value: Option<&Value>, label: &str) -> String {
  let needle = label.trim().to_lowercase();
  if needle.is_empty() {
    return "No".to_string();
  }

  let found = match value {
    Some(Value::Array(entries)) => entries.iter().any(|entry| {
      let text = match entry {
        Value::Object(object) => first_present(object, &["name", "value"]),
        other => Some(string_form(other)),
      };
      text.is_some_and(|text| text.trim().to_lowercase() == needle)
    }),
    Some(Value::String(text)) => text.to_lowercase().contains(&needle),
    _ => false,
  };

  let answer = if found { "Yes" } else { "No" };
  answer.to_string()
}

/// Project one issue through a list of columns.
pub fn project_issue<I: IssueRecord + ?Sized>(issue: &I, columns: &[ColumnDefinition], base_url: &str) -> FormattedRow {
  let key = issue.issue_key().to_string();
  let url = browse_url(base_url, &key);
  let fields = issue.issue_fields();

  let mut seen = HashSet::new();
  let columns = columns
    .iter()
    .filter(|column| column.is_applicable() && seen.insert(column.output_key.as_str()))
    .map(|column| {
      let value = resolve(fields, &column.source_field_path);
      (column.output_key.clone(), format_column(value, column))
    })
    .collect();

  FormattedRow { key, url, columns }
}

/// Project a batch of issues through a list of columns.
pub fn project<I: IssueRecord>(issues: &[I], columns: &[ColumnDefinition], base_url: &str) -> Vec<FormattedRow> {
  issues
    .iter()
    .map(|issue| project_issue(issue, columns, base_url))
    .collect()
}

fn format_text(value: Option<&Value>) -> String {
  match value {
    None => String::new(),
    Some(Value::Array(entries)) => entries
      .iter()
      .map(|entry| match entry {
        Value::Object(object) => first_present(object, &["name"]).unwrap_or_else(|| string_form(entry)),
        other => string_form(other),
      })
      .collect::<Vec<_>>()
      .join(", "),
    Some(value) => match value {
      Value::Object(object) => first_present(object, &["displayName", "name"]).unwrap_or_else(|| string_form(value)),
      other => string_form(other),
    },
  }
}

fn format_badge(value: Option<&Value>) -> String {
  match value {
    None => UNKNOWN_BADGE.to_string(),
    Some(value) => match value {
      Value::Object(object) => first_present(object, &["name", "displayName"]).unwrap_or_else(|| string_form(value)),
      other => string_form(other),
    },
  }
}

fn format_link(value: Option<&Value>) -> String {
  match value {
    None => String::new(),
    Some(Value::String(text)) if is_http_url(text) => text.trim().to_string(),
    Some(value) => match value {
      Value::Object(object) => first_present(object, &["url", "value", "href"]).unwrap_or_else(|| string_form(value)),
      other => string_form(other),
    },
  }
}

fn format_timestamp(value: Option<&Value>, format: &str) -> String {
  let Some(value) = value else {
    return String::new();
  };

  parse_timestamp(value)
    .map(|timestamp| timestamp.format(format).to_string())
    .unwrap_or_else(|| INVALID_DATE.to_string())
}

/// Parse the timestamp shapes Jira emits, keeping the value's own offset.
fn parse_timestamp(value: &Value) -> Option<NaiveDateTime> {
  match value {
    Value::String(text) => {
      let text = text.trim();
      DateTime::parse_from_rfc3339(text)
        .or_else(|_| DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f%z"))
        .map(|timestamp| timestamp.naive_local())
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f").ok())
        .or_else(|| {
          NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
    }
    Value::Number(number) => number
      .as_i64()
      .and_then(DateTime::from_timestamp_millis)
      .map(|timestamp| timestamp.naive_utc()),
    _ => None,
  }
}

/// First of `keys` holding a non-empty string or a number.
fn first_present(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
  keys.iter().find_map(|key| match object.get(*key)? {
    Value::String(text) if !text.is_empty() => Some(text.clone()),
    Value::Number(number) => Some(number.to_string()),
    _ => None,
  })
}

/// Fallback rendering for values without a more specific format.
fn string_form(value: &Value) -> String {
  match value {
    Value::Null => String::new(),
    Value::String(text) => text.clone(),
    Value::Bool(flag) => flag.to_string(),
    Value::Number(number) => number.to_string(),
    Value::Array(entries) => entries.iter().map(string_form).collect::<Vec<_>>().join(","),
    Value::Object(_) => value.to_string(),
  }
}
