//! # Lantern Server
//!
//! HTTP JSON facade for the dashboard. Issue lists come from Jira through the
//! authentication fallback in [`lantern_jira`], are reshaped by the column
//! projector in [`lantern_core`], and Confluence links are summarized on
//! demand by [`lantern_confluence`].

pub mod error;
pub mod handlers;
pub mod state;
pub mod types;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use state::AppState;

/// Build the API router over shared state.
pub fn build_router(state: Arc<AppState>) -> Router {
  Router::new()
    .route("/api/fetch-all-data", get(handlers::fetch_all_data))
    .route("/api/refresh-columns", get(handlers::refresh_columns))
    .route("/api/issues", get(handlers::issues))
    .route("/api/issue/{key}", get(handlers::issue_detail))
    .route("/api/table-config", get(handlers::table_config))
    .route("/api/backend-config", get(handlers::backend_config))
    .route("/api/save-column-config", post(handlers::save_column_config))
    .route("/api/test-token", post(handlers::test_token))
    .route("/api/confluence/summary", get(handlers::confluence_summary))
    .route("/api/confluence/summaries", post(handlers::confluence_summaries))
    .route("/api/health", get(handlers::health))
    .layer(CorsLayer::permissive())
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
