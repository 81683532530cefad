//! Output renderings of an inventory
//!
//! Three mutually exclusive renderings of the same [`InventoryResult`]:
//! pretty JSON, a human-readable text report, and the figpack consumer
//! schema.

use crate::error::InventoryError;
use crate::types::InventoryResult;
use serde::Serialize;
use tracing::warn;

/// Width of the rule lines in the text report
const RULE_WIDTH: usize = 80;

/// Invalid URLs shown in the text report before truncating
const INVALID_URL_DISPLAY_LIMIT: usize = 10;

/// Render the whole result as pretty-printed JSON
pub fn render_json(result: &InventoryResult) -> Result<String, InventoryError> {
    serde_json::to_string_pretty(result).map_err(InventoryError::Serialize)
}

/// Render a human-readable report
pub fn render_text(result: &InventoryResult) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    out.push_str("Documentation Page Index\n");
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format!("Doc Type:           {}\n", result.doc_type));
    out.push_str(&format!("Documentation URL:  {}\n", result.docs_url));
    out.push_str(&format!("Has sources dir:    {}\n", result.has_sources_dir));
    if let Some(repo) = &result.source_repo_url {
        out.push_str(&format!("Source Repository:  {repo}\n"));
    }
    out.push_str(&format!("Total Pages:        {}\n", result.total_pages));
    out.push_str(&rule);
    out.push_str("\n\n");

    for page in &result.pages {
        out.push_str(&page.docname);
        out.push('\n');
        if let Some(title) = page.title.as_deref().filter(|t| !t.is_empty()) {
            out.push_str(&format!("  Title:       {title}\n"));
        }
        out.push_str(&format!("  HTML:        {}\n", page.html_url));
        out.push_str(&format!("  Source File: {}\n", page.source_filename));
        if let Some(url) = &page.source_url {
            out.push_str(&format!("  Source URL:  {url}\n"));
        }
        // The repo URL often duplicates source_url; only show it when it adds anything.
        if let Some(url) = &page.repo_source_url {
            if page.source_url.as_ref() != Some(url) {
                out.push_str(&format!("  Repo URL:    {url}\n"));
            }
        }
        out.push('\n');
    }

    if let Some(validation) = &result.validation {
        out.push_str(&rule);
        out.push('\n');
        out.push_str("Validation Results\n");
        out.push_str(&rule);
        out.push('\n');
        out.push_str(&format!("Total URLs checked: {}\n", validation.total_checked));
        out.push_str(&format!("Valid:              {}\n", validation.valid_count));
        out.push_str(&format!("Invalid:            {}\n", validation.invalid_count));

        if !validation.invalid_urls.is_empty() {
            out.push_str(&format!(
                "\nInvalid URLs (first {INVALID_URL_DISPLAY_LIMIT}):\n"
            ));
            for invalid in validation.invalid_urls.iter().take(INVALID_URL_DISPLAY_LIMIT) {
                out.push_str(&format!(
                    "  {} ({}): {}\n",
                    invalid.docname, invalid.url_type, invalid.url
                ));
            }
            let remaining = validation
                .invalid_urls
                .len()
                .saturating_sub(INVALID_URL_DISPLAY_LIMIT);
            if remaining > 0 {
                out.push_str(&format!("  ... and {remaining} more\n"));
            }
        }
    }

    out
}

/// One entry in the figpack docPages schema
#[derive(Debug, Serialize)]
struct FigpackPage<'a> {
    title: &'a str,
    url: &'a str,
    #[serde(rename = "sourceUrl")]
    source_url: &'a str,
    #[serde(rename = "includeFromStart")]
    include_from_start: bool,
}

/// Single-key envelope the figpack consumer expects
#[derive(Debug, Serialize)]
struct FigpackExport<'a> {
    #[serde(rename = "docPages")]
    doc_pages: Vec<FigpackPage<'a>>,
}

/// Render the figpack consumer schema
///
/// Pages without a source URL cannot be represented and are skipped with a
/// warning. Titles fall back to the docname; `includeFromStart` is always
/// true.
pub fn render_figpack(result: &InventoryResult) -> Result<String, InventoryError> {
    let mut doc_pages = Vec::new();
    for page in &result.pages {
        let Some(source_url) = page.source_url.as_deref() else {
            warn!(docname = %page.docname, "Skipping page, no source URL available");
            continue;
        };
        // An empty title is as useless as a missing one; fall back either way.
        let title = match page.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => &page.docname,
        };
        doc_pages.push(FigpackPage {
            title,
            url: &page.html_url,
            source_url,
            include_from_start: true,
        });
    }
    serde_json::to_string_pretty(&FigpackExport { doc_pages }).map_err(InventoryError::Serialize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DocType, InvalidUrl, PageRecord, UrlType, ValidationSummary};

    fn sample_result() -> InventoryResult {
        InventoryResult {
            docs_url: "https://example.com/docs/".to_string(),
            doc_type: DocType::Sphinx,
            has_sources_dir: true,
            source_repo_url: None,
            total_pages: 2,
            pages: vec![
                PageRecord {
                    docname: "index".to_string(),
                    title: Some("Home".to_string()),
                    html_url: "https://example.com/docs/index.html".to_string(),
                    source_filename: "index.rst".to_string(),
                    source_url: Some(
                        "https://example.com/docs/_sources/index.rst.txt".to_string(),
                    ),
                    repo_source_url: None,
                },
                PageRecord {
                    docname: "guide".to_string(),
                    title: None,
                    html_url: "https://example.com/docs/guide.html".to_string(),
                    source_filename: "guide.rst".to_string(),
                    source_url: None,
                    repo_source_url: None,
                },
            ],
            validation: None,
        }
    }

    #[test]
    fn test_render_json_pretty() {
        let json = render_json(&sample_result()).unwrap();
        assert!(json.contains("\"doc_type\": \"sphinx\""));
        assert!(json.contains("\"total_pages\": 2"));
        // Pretty-printed, so nested fields are indented
        assert!(json.contains("\n  \"pages\""));
    }

    #[test]
    fn test_render_text_header_and_pages() {
        let text = render_text(&sample_result());
        assert!(text.starts_with("Documentation Page Index\n"));
        assert!(text.contains("Doc Type:           sphinx\n"));
        assert!(text.contains("Has sources dir:    true\n"));
        assert!(text.contains("Total Pages:        2\n"));
        assert!(text.contains("  Title:       Home\n"));
        assert!(text.contains("  Source File: guide.rst\n"));
        // No repository line when none was supplied
        assert!(!text.contains("Source Repository:"));
        // No validation block when validation did not run
        assert!(!text.contains("Validation Results"));
    }

    #[test]
    fn test_render_text_hides_duplicate_repo_url() {
        let mut result = sample_result();
        let url = "https://github.com/org/repo/blob/main/docs/index.rst".to_string();
        result.pages[0].source_url = Some(url.clone());
        result.pages[0].repo_source_url = Some(url);
        let text = render_text(&result);
        assert!(text.contains("  Source URL:  "));
        assert!(!text.contains("  Repo URL:    "));
    }

    #[test]
    fn test_render_text_shows_differing_repo_url() {
        let mut result = sample_result();
        result.pages[0].repo_source_url =
            Some("https://github.com/org/repo/blob/main/docs/index.rst".to_string());
        let text = render_text(&result);
        assert!(text.contains("  Repo URL:    https://github.com/org/repo/blob/main/docs/index.rst\n"));
    }

    #[test]
    fn test_render_text_validation_block_truncates() {
        let mut result = sample_result();
        let invalid_urls: Vec<InvalidUrl> = (0..12)
            .map(|i| InvalidUrl {
                docname: format!("page{i:02}"),
                url_type: UrlType::SourceUrl,
                url: format!("https://example.com/docs/_sources/page{i:02}.rst.txt"),
            })
            .collect();
        result.validation = Some(ValidationSummary {
            validated: true,
            total_checked: 14,
            valid_count: 2,
            invalid_count: 12,
            invalid_urls,
        });

        let text = render_text(&result);
        assert!(text.contains("Total URLs checked: 14\n"));
        assert!(text.contains("Invalid URLs (first 10):\n"));
        assert!(text.contains("page09 (source_url)"));
        assert!(!text.contains("page10 (source_url)"));
        assert!(text.contains("... and 2 more\n"));
    }

    #[test]
    fn test_render_figpack_skips_sourceless_pages() {
        let json = render_figpack(&sample_result()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let doc_pages = value["docPages"].as_array().unwrap();
        // "guide" has no source_url and is omitted
        assert_eq!(doc_pages.len(), 1);
        assert_eq!(doc_pages[0]["title"], "Home");
        assert_eq!(doc_pages[0]["url"], "https://example.com/docs/index.html");
        assert_eq!(
            doc_pages[0]["sourceUrl"],
            "https://example.com/docs/_sources/index.rst.txt"
        );
        assert_eq!(doc_pages[0]["includeFromStart"], true);
    }

    #[test]
    fn test_render_figpack_title_falls_back_to_docname() {
        let mut result = sample_result();
        result.pages[0].title = None;
        let json = render_figpack(&result).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["docPages"][0]["title"], "index");

        result.pages[0].title = Some(String::new());
        let json = render_figpack(&result).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["docPages"][0]["title"], "index");
    }
}
