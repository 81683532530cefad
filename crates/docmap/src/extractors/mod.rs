//! Generator-specific index extractors
//!
//! Design: each extractor knows its generator's well-known search-index
//! path and how to turn that index into an [`InventoryResult`]. The
//! registry probes the paths in registration order; the first index that
//! fetches decides the generator, and its body is handed straight to the
//! extractor so the index is only downloaded once.

mod mkdocs;
mod sphinx;

pub use mkdocs::{infer_repo_base, MkdocsExtractor};
pub use sphinx::SphinxExtractor;

use crate::error::InventoryError;
use crate::fetcher::Fetcher;
use crate::types::{DocType, InventoryResult};
use async_trait::async_trait;
use tracing::{debug, info};

/// Trait for generator-specific page extraction
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Generator this extractor handles
    fn doc_type(&self) -> DocType;

    /// Well-known search-index path relative to the documentation base
    fn index_path(&self) -> &'static str;

    /// Build the page inventory from an already-fetched index body
    ///
    /// `docs_url` is normalized to end with a slash. `source_repo_url` is
    /// the user-supplied repository base, if any.
    async fn extract(
        &self,
        fetcher: &Fetcher,
        docs_url: &str,
        raw_index: &str,
        source_repo_url: Option<&str>,
    ) -> Result<InventoryResult, InventoryError>;
}

/// Registry of extractors probed in registration order
pub struct ExtractorRegistry {
    extractors: Vec<Box<dyn Extractor>>,
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ExtractorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            extractors: Vec::new(),
        }
    }

    /// Create a registry with both built-in extractors
    ///
    /// Sphinx is probed before MkDocs.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(SphinxExtractor::new()));
        registry.register(Box::new(MkdocsExtractor::new()));
        registry
    }

    /// Register an extractor
    pub fn register(&mut self, extractor: Box<dyn Extractor>) {
        self.extractors.push(extractor);
    }

    /// Detect the generator by probing each extractor's index resource
    ///
    /// Returns the winning extractor together with the fetched index body.
    /// If no index resource is reachable the site is not a recognized
    /// generator output (or is down) and the run cannot proceed.
    pub async fn detect<'a>(
        &'a self,
        fetcher: &Fetcher,
        docs_url: &str,
    ) -> Result<(&'a dyn Extractor, String), InventoryError> {
        for extractor in &self.extractors {
            let index_url = format!("{}{}", docs_url, extractor.index_path());
            debug!(url = %index_url, "Probing search index");
            if let Some(body) = fetcher.fetch_body(&index_url).await {
                info!(doc_type = %extractor.doc_type(), url = %index_url, "Found search index");
                return Ok((extractor.as_ref(), body));
            }
        }
        Err(InventoryError::UnknownGenerator(docs_url.to_string()))
    }
}

/// Normalize a repository base URL to exactly one trailing slash
pub(crate) fn normalize_repo_base(url: &str) -> String {
    format!("{}/", url.trim_end_matches('/'))
}
