//! # Confluence Content Endpoints
//!
//! Page summaries for single links and batches. Every failure is reported in
//! the returned [`SummaryResult`] instead of as an error.

use std::collections::BTreeMap;
use std::time::Instant;

use futures::future::join_all;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::client::ConfluenceClient;
use crate::consts::BATCH_STAGGER;
use crate::error::ConfluenceError;
use crate::models::{ContentPage, SummaryResult};
use crate::page::{extract_page_id, extract_url};
use crate::summary::extract_summary;

impl ConfluenceClient {
  /// Summarize the page a field value points at.
  #[instrument(skip(self, link, token), level = "debug")]
  pub async fn get_summary(&self, link: &Value, token: Option<&str>) -> SummaryResult {
    match self.fetch_summary(link, token).await {
      Ok(result) => result,
      Err(err) => {
        warn!("Confluence summary for {} failed: {}", link, err);
        SummaryResult::failed(err.to_string())
      }
    }
  }

  /// Summarize several pages concurrently, keyed by the link as given.
  ///
  /// Request `i` starts `i * 100ms` after the first so a large table doesn't
  /// hit Confluence with a burst. One failing link never affects the others.
  #[instrument(skip(self, links, token), level = "debug")]
  pub async fn get_summaries(&self, links: &[Value], token: Option<&str>) -> BTreeMap<String, SummaryResult> {
    let started = Instant::now();
    let lookups = links.iter().enumerate().map(|(index, link)| async move {
      let delay = BATCH_STAGGER.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX));
      tokio::time::sleep(delay).await;
      (link_key(link), self.get_summary(link, token).await)
    });

    let results: BTreeMap<String, SummaryResult> = join_all(lookups).await.into_iter().collect();

    info!(
      pages = results.len(),
      failed = results.values().filter(|result| !result.success).count(),
      elapsed_ms = started.elapsed().as_millis() as u64,
      "Confluence batch completed"
    );
    results
  }

  async fn fetch_summary(&self, link: &Value, token: Option<&str>) -> Result<SummaryResult, ConfluenceError> {
    let page_url = extract_url(link).ok_or(ConfluenceError::NoUrl)?;
    let page_id = extract_page_id(&page_url).ok_or(ConfluenceError::NoPageId)?;
    let base_url = self
      .api_base_for(&page_url)
      .ok_or_else(|| ConfluenceError::NoBaseUrl(page_url.clone()))?;

    let url = format!("{base_url}/rest/api/content/{page_id}?expand=body.storage,version");
    debug!("Fetching Confluence page {}", url);

    let mut request = self.client.get(&url);
    if let Some(token) = self.auth.resolve(token) {
      request = request.bearer_auth(token);
    }
    let response = request.send().await?;

    let status = response.status();
    if !status.is_success() {
      return Err(ConfluenceError::Http {
        status: status.as_u16(),
      });
    }

    let page = response.json::<ContentPage>().await?;
    Ok(SummaryResult::found(extract_summary(page.storage()), page.title))
  }
}

/// The map key for a link: strings verbatim, anything else as JSON text.
fn link_key(link: &Value) -> String {
  match link {
    Value::String(text) => text.clone(),
    other => other.to_string(),
  }
}
