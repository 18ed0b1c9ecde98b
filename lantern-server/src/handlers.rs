//! # API Handlers
//!
//! One handler per dashboard endpoint. Issue lists are fetched through the
//! Jira client's auth fallback and projected with either the full column
//! schema or the user's display selection.

use std::sync::Arc;
use std::time::Instant;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use lantern_confluence::SummaryResult;
use lantern_core::{ColumnSchema, project, project_issue};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::error::ApiError;
use crate::state::{AppState, SaveColumnsError};
use crate::types::{
  BackendConfigResponse, HealthResponse, IssueDetailResponse, IssuesResponse, JqlQuery, SaveColumnsRequest, Success,
  SummariesRequest, SummariesResponse, SummaryQuery, TableConfigResponse, TestTokenRequest, TestTokenResponse,
};

pub const JIRA_TOKEN_HEADER: &str = "x-jira-token";
pub const CONFLUENCE_TOKEN_HEADER: &str = "x-confluence-token";

type ApiResult<T> = Result<Json<Success<T>>, ApiError>;

/// `GET /api/fetch-all-data`: every configured column, caller token required.
pub async fn fetch_all_data(
  State(state): State<Arc<AppState>>,
  headers: HeaderMap,
  Query(query): Query<JqlQuery>,
) -> ApiResult<IssuesResponse> {
  let token = header_token(&headers, JIRA_TOKEN_HEADER).ok_or_else(ApiError::missing_token)?;
  let columns = state.all_columns().clone();
  search_and_project(&state, "fetch-all-data", query.jql, columns, Some(token)).await
}

/// `GET /api/refresh-columns`: display columns only, caller token required.
pub async fn refresh_columns(
  State(state): State<Arc<AppState>>,
  headers: HeaderMap,
  Query(query): Query<JqlQuery>,
) -> ApiResult<IssuesResponse> {
  let token = header_token(&headers, JIRA_TOKEN_HEADER).ok_or_else(ApiError::missing_token)?;
  let columns = state.display_columns().await;
  search_and_project(&state, "refresh-columns", query.jql, columns, Some(token)).await
}

/// `GET /api/issues`: like refresh-columns, falling back on configured credentials.
pub async fn issues(
  State(state): State<Arc<AppState>>,
  headers: HeaderMap,
  Query(query): Query<JqlQuery>,
) -> ApiResult<IssuesResponse> {
  let token = header_token(&headers, JIRA_TOKEN_HEADER);
  let columns = state.display_columns().await;
  search_and_project(&state, "issues", query.jql, columns, token).await
}

async fn search_and_project(
  state: &AppState,
  endpoint: &str,
  jql: Option<String>,
  columns: ColumnSchema,
  token: Option<&str>,
) -> ApiResult<IssuesResponse> {
  let jql = jql
    .map(|jql| jql.trim().to_string())
    .filter(|jql| !jql.is_empty())
    .unwrap_or_else(|| state.config.jira.default_jql.clone());
  let fields = columns.jira_fields();
  let started = Instant::now();

  match state.jira.search(&jql, &fields, token).await {
    Ok(results) => {
      let rows = project(&results.issues, columns.columns(), state.jira.base_url());
      info!(
        endpoint,
        issues = rows.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Served issue list"
      );
      Ok(Json(Success::new(IssuesResponse {
        jql,
        total: results.total,
        count: rows.len(),
        columns: columns.columns().to_vec(),
        issues: rows,
      })))
    }
    Err(err) => {
      error!(
        endpoint,
        status = err.status_code().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Jira search failed: {}",
        err
      );
      Err(ApiError::from_jira(&err, state.development()))
    }
  }
}

/// `GET /api/issue/{key}`
pub async fn issue_detail(
  State(state): State<Arc<AppState>>,
  headers: HeaderMap,
  Path(key): Path<String>,
) -> ApiResult<IssueDetailResponse> {
  let token = header_token(&headers, JIRA_TOKEN_HEADER);
  let started = Instant::now();

  match state.jira.get_issue_details(&key, token).await {
    Ok(issue) => {
      let row = project_issue(&issue, state.all_columns().columns(), state.jira.base_url());
      Ok(Json(Success::new(IssueDetailResponse { issue, row })))
    }
    Err(err) => {
      error!(
        endpoint = "issue",
        key = %key,
        status = err.status_code().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Jira issue lookup failed: {}",
        err
      );
      Err(ApiError::from_jira(&err, state.development()))
    }
  }
}

/// `GET /api/table-config`
pub async fn table_config(State(state): State<Arc<AppState>>) -> ApiResult<TableConfigResponse> {
  let columns = state.display_columns().await;
  Ok(Json(Success::new(TableConfigResponse {
    columns: columns.columns().to_vec(),
  })))
}

/// `GET /api/backend-config`
pub async fn backend_config(State(state): State<Arc<AppState>>) -> ApiResult<BackendConfigResponse> {
  let display = state.display_columns().await;
  let jira = &state.config.jira;

  Ok(Json(Success::new(BackendConfigResponse {
    columns: state.all_columns().columns().to_vec(),
    display_columns: display.output_keys().into_iter().map(str::to_string).collect(),
    jira_base_url: jira.base_url.clone(),
    confluence_base_url: state.confluence.base_url().map(str::to_string),
    default_jql: jira.default_jql.clone(),
    max_results: jira.max_results,
    has_pat: jira.pat.is_some(),
    has_basic_auth: jira.has_basic_credentials(),
    has_confluence_token: state.config.confluence.token.is_some(),
  })))
}

/// `POST /api/save-column-config`
pub async fn save_column_config(
  State(state): State<Arc<AppState>>,
  payload: Result<Json<SaveColumnsRequest>, JsonRejection>,
) -> ApiResult<TableConfigResponse> {
  let Json(request) = payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
  let keys: Vec<String> = request
    .user_columns
    .iter()
    .map(|choice| choice.output_key().to_string())
    .collect();

  match state.save_display_columns(&keys).await {
    Ok(selection) => Ok(Json(Success::new(TableConfigResponse {
      columns: selection.columns().to_vec(),
    }))),
    Err(SaveColumnsError::Invalid(err)) => {
      warn!("Rejected column selection: {}", err);
      Err(ApiError::bad_request(err.to_string()))
    }
    Err(SaveColumnsError::Persist(err)) => {
      error!("Failed to save column selection: {}", err);
      Err(ApiError::from_config(&err, state.development()))
    }
    Err(SaveColumnsError::Task(err)) => {
      error!("Column selection writer failed: {}", err);
      Err(ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Failed to save column selection"))
    }
  }
}

/// `POST /api/test-token`
pub async fn test_token(
  State(state): State<Arc<AppState>>,
  headers: HeaderMap,
  payload: Result<Json<TestTokenRequest>, JsonRejection>,
) -> ApiResult<TestTokenResponse> {
  let Json(request) = payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
  let token = request
    .token
    .as_deref()
    .map(str::trim)
    .filter(|token| !token.is_empty())
    .or_else(|| header_token(&headers, JIRA_TOKEN_HEADER))
    .ok_or_else(|| ApiError::bad_request("Token is required"))?;

  match state.jira.test_token(token, request.email.as_deref()).await {
    Ok(user) => Ok(Json(Success::new(TestTokenResponse { user }))),
    Err(err) => {
      warn!(endpoint = "test-token", status = err.status_code().as_u16(), "Token check failed: {}", err);
      Err(ApiError::from_jira(&err, state.development()))
    }
  }
}

/// `GET /api/confluence/summary`
pub async fn confluence_summary(
  State(state): State<Arc<AppState>>,
  headers: HeaderMap,
  Query(query): Query<SummaryQuery>,
) -> Json<SummaryResult> {
  let token = confluence_token(&headers);
  let link = query.url.map_or(Value::Null, Value::String);
  Json(state.confluence.get_summary(&link, token).await)
}

/// `POST /api/confluence/summaries`
pub async fn confluence_summaries(
  State(state): State<Arc<AppState>>,
  headers: HeaderMap,
  payload: Result<Json<SummariesRequest>, JsonRejection>,
) -> ApiResult<SummariesResponse> {
  let Json(request) = payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
  let token = confluence_token(&headers);
  let summaries = state.confluence.get_summaries(&request.urls, token).await;
  Ok(Json(Success::new(SummariesResponse { summaries })))
}

/// `GET /api/health`
pub async fn health() -> Json<HealthResponse> {
  Json(HealthResponse {
    status: "ok",
    timestamp: chrono::Utc::now().to_rfc3339(),
    version: env!("CARGO_PKG_VERSION"),
  })
}

/// A non-empty token from `name`, with any `Bearer ` prefix removed.
fn header_token<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
  let value = headers.get(name)?.to_str().ok()?.trim();
  let token = value.strip_prefix("Bearer ").map_or(value, str::trim);
  (!token.is_empty()).then_some(token)
}

fn confluence_token(headers: &HeaderMap) -> Option<&str> {
  header_token(headers, CONFLUENCE_TOKEN_HEADER).or_else(|| header_token(headers, JIRA_TOKEN_HEADER))
}
