//! Sphinx search-index extractor
//!
//! Sphinx ships its search index as `searchindex.js`, a script file whose
//! entire body is one `Search.setIndex({...})` call. The JSON payload inside
//! the parentheses carries `docnames` (ordered page identifiers) and
//! `titles` (a parallel array, which may be shorter).

use crate::error::InventoryError;
use crate::extractors::{normalize_repo_base, Extractor};
use crate::fetcher::Fetcher;
use crate::types::{DocType, InventoryResult, PageRecord};
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use tracing::{info, warn};

/// Well-known index path for Sphinx sites
const SPHINX_INDEX_PATH: &str = "searchindex.js";

/// Raw-source file probed to decide whether the site publishes `_sources/`
const SOURCES_PROBE_PATH: &str = "_sources/index.rst.txt";

// Greedy so the capture runs to the last closing paren of the call.
static SET_INDEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)Search\.setIndex\((.*)\)").unwrap());

/// The slice of the search index this tool consumes
#[derive(Debug, Deserialize)]
struct SphinxIndex {
    #[serde(default)]
    docnames: Vec<String>,
    #[serde(default)]
    titles: Vec<String>,
}

/// Extractor for Sphinx-generated sites
pub struct SphinxExtractor;

impl SphinxExtractor {
    /// Create a new Sphinx extractor
    pub fn new() -> Self {
        Self
    }
}

impl Default for SphinxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Unwrap the `Search.setIndex(...)` call and decode its JSON payload
///
/// The two failure modes stay distinct: a missing wrapper is
/// [`InventoryError::IndexFormat`], a wrapper around bad JSON is
/// [`InventoryError::IndexJson`].
fn parse_search_index(raw: &str) -> Result<SphinxIndex, InventoryError> {
    let captures = SET_INDEX_RE.captures(raw).ok_or_else(|| {
        InventoryError::IndexFormat("missing Search.setIndex(...) wrapper".to_string())
    })?;
    serde_json::from_str(&captures[1]).map_err(InventoryError::IndexJson)
}

/// Build one page record, resolving the source URL priority
///
/// A detected `_sources/` directory wins for `source_url`; a repository
/// base always populates `repo_source_url` and stands in for `source_url`
/// when there is no sources directory. Both fields are kept when both
/// resolve, even if they differ.
fn build_page(
    docs_url: &str,
    docname: &str,
    title: Option<String>,
    has_sources_dir: bool,
    repo_base: Option<&str>,
) -> PageRecord {
    let sources_url = has_sources_dir.then(|| format!("{docs_url}_sources/{docname}.rst.txt"));
    let repo_source_url = repo_base.map(|base| format!("{base}{docname}.rst"));
    let source_url = sources_url.or_else(|| repo_source_url.clone());

    PageRecord {
        docname: docname.to_string(),
        title,
        html_url: format!("{docs_url}{docname}.html"),
        source_filename: format!("{docname}.rst"),
        source_url,
        repo_source_url,
    }
}

#[async_trait]
impl Extractor for SphinxExtractor {
    fn doc_type(&self) -> DocType {
        DocType::Sphinx
    }

    fn index_path(&self) -> &'static str {
        SPHINX_INDEX_PATH
    }

    async fn extract(
        &self,
        fetcher: &Fetcher,
        docs_url: &str,
        raw_index: &str,
        source_repo_url: Option<&str>,
    ) -> Result<InventoryResult, InventoryError> {
        let index = parse_search_index(raw_index)?;
        if index.docnames.is_empty() {
            warn!("Search index contains no documents");
        }
        info!(documents = index.docnames.len(), "Parsed Sphinx search index");

        // One probe decides has_sources_dir for every page.
        let probe_url = format!("{docs_url}{SOURCES_PROBE_PATH}");
        let has_sources_dir = fetcher.check_reachable(&probe_url).await;
        if has_sources_dir {
            info!("Found _sources/ directory, using it for source URLs");
        } else {
            info!("No _sources/ directory found");
            if source_repo_url.is_none() {
                info!("Consider supplying a repository base for source file URLs");
            }
        }

        let repo_base = source_repo_url.map(normalize_repo_base);
        let pages: Vec<PageRecord> = index
            .docnames
            .iter()
            .enumerate()
            .map(|(i, docname)| {
                build_page(
                    docs_url,
                    docname,
                    index.titles.get(i).cloned(),
                    has_sources_dir,
                    repo_base.as_deref(),
                )
            })
            .collect();

        Ok(InventoryResult {
            docs_url: docs_url.to_string(),
            doc_type: DocType::Sphinx,
            has_sources_dir,
            source_repo_url: source_repo_url.map(str::to_string),
            total_pages: pages.len(),
            pages,
            validation: None,
        })
    }
}
