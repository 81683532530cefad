//! Inventory pipeline entry points
//!
//! This module drives the whole pipeline: normalize the base URL, detect
//! the generator, extract the page inventory, and optionally validate the
//! computed source URLs. The per-generator logic lives in the
//! [`extractors`](crate::extractors) module.

use crate::error::InventoryError;
use crate::extractors::ExtractorRegistry;
use crate::fetcher::Fetcher;
use crate::types::InventoryResult;
use crate::validate::validate_pages;
use tracing::info;
use url::Url;

/// Options for an inventory run
#[derive(Debug, Clone, Default)]
pub struct InventoryOptions {
    /// Repository base URL for source files (e.g. a GitHub blob path)
    pub source_repo_url: Option<String>,
    /// Check that computed source URLs resolve (slower)
    pub validate: bool,
}

/// Build the page inventory for a documentation site
///
/// Uses the default extractor registry. Fatal outcomes are detection
/// failure and a reachable-but-malformed index; everything else degrades
/// to warnings or absent fields.
pub async fn build_inventory(
    fetcher: &Fetcher,
    docs_url: &str,
    options: &InventoryOptions,
) -> Result<InventoryResult, InventoryError> {
    if !docs_url.starts_with("http://") && !docs_url.starts_with("https://") {
        return Err(InventoryError::InvalidUrl);
    }
    Url::parse(docs_url).map_err(|_| InventoryError::InvalidUrl)?;

    let docs_url = ensure_trailing_slash(docs_url);

    let registry = ExtractorRegistry::with_defaults();
    let (extractor, raw_index) = registry.detect(fetcher, &docs_url).await?;

    let mut result = extractor
        .extract(
            fetcher,
            &docs_url,
            &raw_index,
            options.source_repo_url.as_deref(),
        )
        .await?;

    if options.validate {
        info!(pages = result.total_pages, "Validating source URLs");
        result.validation = Some(validate_pages(fetcher, &result.pages).await);
    }

    Ok(result)
}

/// Normalize a documentation base URL to end with a slash
fn ensure_trailing_slash(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{url}/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_trailing_slash() {
        assert_eq!(
            ensure_trailing_slash("https://example.com/docs"),
            "https://example.com/docs/"
        );
        assert_eq!(
            ensure_trailing_slash("https://example.com/docs/"),
            "https://example.com/docs/"
        );
    }

    #[tokio::test]
    async fn test_build_inventory_rejects_bad_scheme() {
        let fetcher = Fetcher::new().unwrap();
        let result = build_inventory(&fetcher, "ftp://example.com/docs", &Default::default()).await;
        assert!(matches!(result, Err(InventoryError::InvalidUrl)));
    }

    #[tokio::test]
    async fn test_build_inventory_rejects_unparseable_url() {
        let fetcher = Fetcher::new().unwrap();
        let result = build_inventory(&fetcher, "http://", &Default::default()).await;
        assert!(matches!(result, Err(InventoryError::InvalidUrl)));
    }
}
