//! Source URL validation
//!
//! Reachability checks are independent and read-only, so they fan out over
//! a bounded pool and the results are merged in the single driving task.
//! Counts and the invalid list are functions of the set of outcomes, never
//! of completion order.

use crate::fetcher::Fetcher;
use crate::types::{InvalidUrl, PageRecord, UrlType, ValidationSummary};
use futures::{stream, StreamExt};
use tracing::info;

/// Maximum simultaneous in-flight reachability checks
pub const MAX_IN_FLIGHT: usize = 10;

/// Completed checks between progress log lines
const PROGRESS_INTERVAL: usize = 10;

/// One reachability check to perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlCheck {
    /// Page the URL belongs to
    pub docname: String,
    /// Which of the page's URLs this is
    pub url_type: UrlType,
    /// The URL to check
    pub url: String,
}

/// Collect the full set of checks for a page list
///
/// A page contributes up to two checks, one per populated URL field.
pub fn collect_checks(pages: &[PageRecord]) -> Vec<UrlCheck> {
    let mut checks = Vec::new();
    for page in pages {
        if let Some(url) = &page.source_url {
            checks.push(UrlCheck {
                docname: page.docname.clone(),
                url_type: UrlType::SourceUrl,
                url: url.clone(),
            });
        }
        if let Some(url) = &page.repo_source_url {
            checks.push(UrlCheck {
                docname: page.docname.clone(),
                url_type: UrlType::RepoSourceUrl,
                url: url.clone(),
            });
        }
    }
    checks
}

/// Check every computed source URL and aggregate the outcomes
pub async fn validate_pages(fetcher: &Fetcher, pages: &[PageRecord]) -> ValidationSummary {
    let checks = collect_checks(pages);
    if checks.is_empty() {
        info!("No source URLs to validate");
        return ValidationSummary {
            validated: true,
            total_checked: 0,
            valid_count: 0,
            invalid_count: 0,
            invalid_urls: Vec::new(),
        };
    }

    let total = checks.len();
    info!(total, "Checking source URLs");

    let mut outcomes = stream::iter(checks)
        .map(|check| async move {
            let reachable = fetcher.check_reachable(&check.url).await;
            (check, reachable)
        })
        .buffer_unordered(MAX_IN_FLIGHT);

    let mut valid_count = 0;
    let mut invalid: Vec<UrlCheck> = Vec::new();
    let mut completed = 0;
    while let Some((check, reachable)) = outcomes.next().await {
        completed += 1;
        if reachable {
            valid_count += 1;
        } else {
            invalid.push(check);
        }
        if completed % PROGRESS_INTERVAL == 0 {
            info!("Progress: {completed}/{total} URLs checked");
        }
    }

    // Completion order is nondeterministic; sort so the summary isn't.
    invalid.sort_by(|a, b| {
        a.docname
            .cmp(&b.docname)
            .then(a.url_type.cmp(&b.url_type))
    });

    let invalid_count = invalid.len();
    info!(valid = valid_count, invalid = invalid_count, "Validation complete");

    ValidationSummary {
        validated: true,
        total_checked: total,
        valid_count,
        invalid_count,
        invalid_urls: invalid
            .into_iter()
            .map(|check| InvalidUrl {
                docname: check.docname,
                url_type: check.url_type,
                url: check.url,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(docname: &str, source_url: Option<&str>, repo_source_url: Option<&str>) -> PageRecord {
        PageRecord {
            docname: docname.to_string(),
            title: None,
            html_url: format!("https://example.com/docs/{docname}.html"),
            source_filename: format!("{docname}.rst"),
            source_url: source_url.map(str::to_string),
            repo_source_url: repo_source_url.map(str::to_string),
        }
    }

    #[test]
    fn test_collect_checks_both_urls() {
        let pages = vec![page(
            "index",
            Some("https://example.com/docs/_sources/index.rst.txt"),
            Some("https://github.com/org/repo/blob/main/docs/index.rst"),
        )];
        let checks = collect_checks(&pages);
        assert_eq!(checks.len(), 2);
        assert_eq!(checks[0].url_type, UrlType::SourceUrl);
        assert_eq!(checks[1].url_type, UrlType::RepoSourceUrl);
    }

    #[test]
    fn test_collect_checks_no_urls() {
        let pages = vec![page("index", None, None), page("guide", None, None)];
        assert!(collect_checks(&pages).is_empty());
    }

    #[tokio::test]
    async fn test_validate_empty_set_is_zero_work() {
        let fetcher = Fetcher::new().unwrap();
        let summary = validate_pages(&fetcher, &[page("index", None, None)]).await;
        assert!(summary.validated);
        assert_eq!(summary.total_checked, 0);
        assert_eq!(summary.valid_count, 0);
        assert_eq!(summary.invalid_count, 0);
        assert!(summary.invalid_urls.is_empty());
    }
}
