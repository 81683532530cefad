//! docmap - documentation page inventory and source mapping
//!
//! This crate discovers the page inventory of a published documentation
//! site (Sphinx- or MkDocs-generated), maps each rendered HTML page back
//! to its authoring source document (reStructuredText or Markdown), and
//! optionally verifies that the computed source URLs resolve.
//!
//! ## Pipeline
//!
//! Detection probes the generators' well-known search-index resources;
//! the matching [`Extractor`] turns the index into an [`InventoryResult`];
//! an optional validation pass checks source URLs over a bounded pool;
//! the result renders as JSON, a text report, or the figpack schema.
//!
//! Built-in extractors:
//! - [`SphinxExtractor`] - `searchindex.js` sites, with `_sources/` probing
//! - [`MkdocsExtractor`] - `search/search_index.json` sites, with edit-link
//!   repository inference

pub mod client;
mod error;
pub mod extractors;
mod fetcher;
mod format;
mod types;
mod validate;

pub use client::{build_inventory, InventoryOptions};
pub use error::InventoryError;
pub use extractors::{
    infer_repo_base, Extractor, ExtractorRegistry, MkdocsExtractor, SphinxExtractor,
};
pub use fetcher::{FetchConfig, Fetcher};
pub use format::{render_figpack, render_json, render_text};
pub use types::{
    DocType, InvalidUrl, InventoryResult, PageRecord, UrlType, ValidationSummary,
};
pub use validate::{collect_checks, validate_pages, UrlCheck, MAX_IN_FLIGHT};

/// Default User-Agent string
///
/// Browser-like because some documentation hosts reject obviously
/// programmatic agents, with the tool name appended for identification.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; docmap/0.1)";
