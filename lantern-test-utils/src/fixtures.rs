//! Jira and Confluence payloads shaped like real server responses

use serde_json::{Value, json};

/// A fully populated issue as returned by `/rest/api/2/search`
pub fn sample_issue(key: &str) -> Value {
  let id = key.rsplit('-').next().unwrap_or("1");
  json!({
      "id": format!("1{id:0>4}"),
      "key": key,
      "self": format!("https://jira.example.com/rest/api/2/issue/1{id:0>4}"),
      "fields": {
          "summary": format!("Summary of {key}"),
          "issuetype": { "name": "Story" },
          "status": { "name": "In Progress", "statusCategory": { "name": "In Progress" } },
          "priority": { "name": "High" },
          "assignee": { "displayName": "Jane Doe", "name": "jdoe" },
          "reporter": { "displayName": "John Roe", "name": "jroe" },
          "created": "2024-01-15T10:30:00.000+0000",
          "updated": "2024-02-01T14:05:09.000+0000",
          "duedate": "2024-03-01",
          "fixVersions": [{ "name": "1.0" }, { "name": "1.1" }],
          "labels": ["backend", "Blocked"],
          "customfield_10100": "https://wiki.example.com/pages/viewpage.action?pageId=12345"
      }
  })
}

/// An issue whose optional fields are all null
pub fn sparse_issue(key: &str) -> Value {
  json!({
      "id": "20000",
      "key": key,
      "fields": {
          "summary": "Sparse",
          "status": null,
          "priority": null,
          "assignee": null,
          "labels": []
      }
  })
}

/// A search response page
pub fn search_response(issues: Vec<Value>, start_at: usize, total: usize) -> Value {
  json!({
      "startAt": start_at,
      "maxResults": issues.len(),
      "total": total,
      "issues": issues
  })
}

/// The body of `/rest/api/2/myself`
pub fn myself(name: &str, email: &str) -> Value {
  json!({
      "name": name,
      "displayName": "Jane Doe",
      "emailAddress": email,
      "active": true
  })
}

/// An HTML login page some Jira deployments serve with status 200
pub const LOGIN_PAGE: &str = "<!DOCTYPE html><html><head><title>Log in</title></head><body>Log in</body></html>";

/// A Confluence content response with the given storage-format body
pub fn confluence_page(id: &str, title: &str, storage: &str) -> Value {
  json!({
      "id": id,
      "type": "page",
      "title": title,
      "version": { "number": 3 },
      "body": {
          "storage": {
              "value": storage,
              "representation": "storage"
          }
      }
  })
}

/// Storage markup with both a Summary heading and a bold Summary paragraph
pub const PAGE_WITH_SUMMARY_HEADING: &str = concat!(
  "<p><strong>Summary:</strong> Bold paragraph summary.</p>",
  "<h2>Summary</h2><p>The heading &amp; its section.</p><p>Second paragraph.</p>",
  "<h2>Details</h2><p>Not part of the summary.</p>"
);
