//! Core types for docmap

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Documentation generator that produced the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocType {
    /// Sphinx-generated site (searchindex.js)
    Sphinx,
    /// MkDocs-generated site (search/search_index.json)
    Mkdocs,
}

impl FromStr for DocType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sphinx" => Ok(DocType::Sphinx),
            "mkdocs" => Ok(DocType::Mkdocs),
            _ => Err("Invalid doc type: must be sphinx or mkdocs".to_string()),
        }
    }
}

impl std::fmt::Display for DocType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocType::Sphinx => write!(f, "sphinx"),
            DocType::Mkdocs => write!(f, "mkdocs"),
        }
    }
}

/// Which of a page's computed URLs a validation check refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlType {
    /// The page's primary source URL
    SourceUrl,
    /// The repository-rooted source URL
    RepoSourceUrl,
}

impl std::fmt::Display for UrlType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UrlType::SourceUrl => write!(f, "source_url"),
            UrlType::RepoSourceUrl => write!(f, "repo_source_url"),
        }
    }
}

/// One documentation page mapped back to its authoring source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Generator-relative page identifier without extension
    pub docname: String,

    /// Human-readable page title, when the index carries one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Absolute URL of the rendered page
    pub html_url: String,

    /// Relative filename of the authoring source (.rst or .md)
    pub source_filename: String,

    /// Absolute URL believed to serve the raw source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,

    /// Absolute URL rooted at a source-repository base
    ///
    /// May coincide with `source_url`. A record with neither URL is valid
    /// and means the source location is unknown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_source_url: Option<String>,
}

/// A source URL that failed a reachability check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidUrl {
    /// Page the URL belongs to
    pub docname: String,
    /// Which of the page's URLs failed
    pub url_type: UrlType,
    /// The URL that did not resolve
    pub url: String,
}

/// Outcome of the reachability pass over all computed source URLs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
    /// Always true when the summary is present
    pub validated: bool,
    /// Number of URLs checked (up to two per page)
    pub total_checked: usize,
    /// URLs that resolved
    pub valid_count: usize,
    /// URLs that did not resolve
    pub invalid_count: usize,
    /// Every failing URL, sorted by (docname, url_type)
    pub invalid_urls: Vec<InvalidUrl>,
}

/// Top-level page inventory for one documentation site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryResult {
    /// Normalized documentation base URL (trailing slash)
    pub docs_url: String,

    /// Generator that produced the site
    pub doc_type: DocType,

    /// Whether the site publishes a raw-sources directory
    ///
    /// Probed once for Sphinx sites; always false for MkDocs.
    pub has_sources_dir: bool,

    /// Source repository base, supplied or inferred
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_repo_url: Option<String>,

    /// Number of pages in `pages`
    pub total_pages: usize,

    /// Page records: docnames order for Sphinx, lexicographic for MkDocs
    pub pages: Vec<PageRecord>,

    /// Present only when validation ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationSummary>,
}
