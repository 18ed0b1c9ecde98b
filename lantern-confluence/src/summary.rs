//! # Summary Extraction
//!
//! Pulls a short plain-text summary out of Confluence storage-format markup.
//! Pages rarely follow a template, so a few heuristics are tried in order:
//!
//! 1. the section under an `h2`/`h3` heading reading "Summary"
//! 2. a paragraph opening with a bold "Summary:" label
//! 3. the first paragraph with any text in it
//! 4. the start of the page text

use std::sync::LazyLock;

use regex::Regex;

use crate::consts::FALLBACK_SUMMARY_CHARS;

static HEADING_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?is)<h([23])\b[^>]*>(.*?)</h[23]\s*>").expect("Failed to compile heading regex"));

static ANY_HEADING_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?i)<h[1-6]\b").expect("Failed to compile heading start regex"));

static BOLD_SUMMARY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?is)<p\b[^>]*>\s*<(?:strong|b)\b[^>]*>\s*summary\s*:?\s*</(?:strong|b)\s*>\s*:?(.*?)</p\s*>")
    .expect("Failed to compile bold summary regex")
});

static PARAGRAPH_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?is)<p\b[^>]*>(.*?)</p\s*>").expect("Failed to compile paragraph regex"));

static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Failed to compile tag regex"));

static WHITESPACE_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\s+").expect("Failed to compile whitespace regex"));

static SUMMARY_TITLE_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?i)^summary\s*:?$").expect("Failed to compile summary title regex"));

/// Strip tags, decode common entities and collapse whitespace.
pub fn clean_html(markup: &str) -> String {
  let without_tags = TAG_REGEX.replace_all(markup, " ");
  let decoded = decode_entities(&without_tags);
  WHITESPACE_REGEX.replace_all(&decoded, " ").trim().to_string()
}

/// Decode the handful of entities Confluence emits in storage format.
pub fn decode_entities(text: &str) -> String {
  // &amp; goes last so "&amp;lt;" stays a literal "&lt;"
  text
    .replace("&nbsp;", " ")
    .replace("&lt;", "<")
    .replace("&gt;", ">")
    .replace("&quot;", "\"")
    .replace("&#39;", "'")
    .replace("&amp;", "&")
}

/// Extract a summary from storage markup, or `None` for an empty page.
pub fn extract_summary(markup: &str) -> Option<String> {
  summary_section(markup)
    .or_else(|| bold_summary(markup))
    .or_else(|| first_paragraph(markup))
    .or_else(|| leading_text(markup))
}

fn summary_section(markup: &str) -> Option<String> {
  HEADING_REGEX
    .captures_iter(markup)
    .filter(|captures| {
      captures
        .get(2)
        .is_some_and(|title| SUMMARY_TITLE_REGEX.is_match(&clean_html(title.as_str())))
    })
    .find_map(|captures| {
      let section_start = captures.get(0)?.end();
      let rest = &markup[section_start..];
      let section_end = ANY_HEADING_REGEX.find(rest).map_or(rest.len(), |heading| heading.start());
      non_empty(clean_html(&rest[..section_end]))
    })
}

fn bold_summary(markup: &str) -> Option<String> {
  BOLD_SUMMARY_REGEX
    .captures_iter(markup)
    .filter_map(|captures| captures.get(1))
    .find_map(|body| non_empty(clean_html(body.as_str())))
}

fn first_paragraph(markup: &str) -> Option<String> {
  PARAGRAPH_REGEX
    .captures_iter(markup)
    .filter_map(|captures| captures.get(1))
    .find_map(|body| non_empty(clean_html(body.as_str())))
}

fn leading_text(markup: &str) -> Option<String> {
  non_empty(clean_html(markup).chars().take(FALLBACK_SUMMARY_CHARS).collect::<String>().trim_end().to_string())
}

fn non_empty(text: String) -> Option<String> {
  if text.is_empty() { None } else { Some(text) }
}

#[cfg(test)]
mod tests {
  use lantern_test_utils::fixtures::PAGE_WITH_SUMMARY_HEADING;

  use super::*;

  #[test]
  fn test_clean_html() {
    assert_eq!(
      clean_html("<p>Fish &amp; chips</p>\n\n<p>&lt;tag&gt;&nbsp;&quot;q&quot; it&#39;s</p>"),
      "Fish & chips <tag> \"q\" it's"
    );
    assert_eq!(clean_html("   <br/>  "), "");
  }

  #[test]
  fn test_decode_entities_does_not_double_decode() {
    assert_eq!(decode_entities("&amp;lt;"), "&lt;");
  }

  #[test]
  fn test_heading_section_wins_over_bold_paragraph() {
    assert_eq!(
      extract_summary(PAGE_WITH_SUMMARY_HEADING).as_deref(),
      Some("The heading & its section. Second paragraph.")
    );
  }

  #[test]
  fn test_heading_variants() {
    let markup = "<h3 class=\"x\">SUMMARY:</h3><p>Under h3.</p><h4>Next</h4><p>After.</p>";
    assert_eq!(extract_summary(markup).as_deref(), Some("Under h3."));

    let h1_only = "<h1>Summary</h1><p>First paragraph.</p>";
    assert_eq!(extract_summary(h1_only).as_deref(), Some("First paragraph."));
  }

  #[test]
  fn test_empty_heading_section_falls_through() {
    let markup = "<h2>Summary</h2><h2>Details</h2><p><strong>Summary:</strong> From bold.</p>";
    assert_eq!(extract_summary(markup).as_deref(), Some("From bold."));
  }

  #[test]
  fn test_bold_summary_paragraph() {
    let markup = "<p>Intro text.</p><p><strong>Summary</strong>: The bold one.</p>";
    assert_eq!(extract_summary(markup).as_deref(), Some("The bold one."));

    let with_b = "<p><b>summary:</b> Lowercase label.</p>";
    assert_eq!(extract_summary(with_b).as_deref(), Some("Lowercase label."));
  }

  #[test]
  fn test_first_non_empty_paragraph() {
    let markup = "<p>  </p><p><br/></p><p>Actual content here.</p><p>More.</p>";
    assert_eq!(extract_summary(markup).as_deref(), Some("Actual content here."));
  }

  #[test]
  fn test_leading_text_fallback() {
    let text = "word ".repeat(200);
    let markup = format!("<div>{text}</div>");
    let summary = extract_summary(&markup).unwrap();
    assert!(summary.chars().count() <= FALLBACK_SUMMARY_CHARS);
    assert!(summary.starts_with("word word"));
  }

  #[test]
  fn test_empty_document() {
    assert_eq!(extract_summary(""), None);
    assert_eq!(extract_summary("<p> </p><div>&nbsp;</div>"), None);
  }
}
