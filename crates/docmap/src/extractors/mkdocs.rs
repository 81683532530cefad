//! MkDocs search-index extractor
//!
//! MkDocs publishes its search index as plain JSON at
//! `search/search_index.json`. Entries are per-section rather than per-page:
//! the same page appears once bare and once per `#anchor`, so extraction
//! dedupes on the anchor-stripped location. MkDocs sites have no analog of
//! Sphinx's `_sources/` directory, so source URLs only exist when a
//! repository base is supplied or can be inferred from an "edit this page"
//! link on the site root.

use crate::error::InventoryError;
use crate::extractors::{normalize_repo_base, Extractor};
use crate::fetcher::Fetcher;
use crate::types::{DocType, InventoryResult, PageRecord};
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::{info, warn};

/// Well-known index path for MkDocs sites
const MKDOCS_INDEX_PATH: &str = "search/search_index.json";

// "Edit this page" links on GitHub/GitLab-backed themes point at
// /edit/<branch>/<path> (or /blob/<branch>/<path>) of the repository.
static EDIT_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"https://(?:github\.com|gitlab\.com)/[^/"'\s]+/[^/"'\s]+/(?:edit|blob)/[^"'\s]+"#)
        .unwrap()
});

/// The slice of the search index this tool consumes
#[derive(Debug, Deserialize)]
struct MkdocsIndex {
    #[serde(default)]
    docs: Vec<MkdocsDoc>,
}

#[derive(Debug, Deserialize)]
struct MkdocsDoc {
    #[serde(default)]
    location: String,
    #[serde(default)]
    title: Option<String>,
}

/// Extractor for MkDocs-generated sites
pub struct MkdocsExtractor;

impl MkdocsExtractor {
    /// Create a new MkDocs extractor
    pub fn new() -> Self {
        Self
    }
}

impl Default for MkdocsExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Infer a repository source-directory base from page HTML
///
/// Takes the first GitHub/GitLab edit-or-blob link, drops the trailing
/// filename component, and rewrites the `edit` segment to `blob` so the
/// result serves raw-ish file views for any filename appended to it.
/// Pure text matching, no DOM parsing.
pub fn infer_repo_base(html: &str) -> Option<String> {
    let link = EDIT_LINK_RE.find(html)?.as_str();
    let (dir, _filename) = link.rsplit_once('/')?;
    Some(dir.replacen("/edit/", "/blob/", 1))
}

/// Deduplicate index entries down to one title per anchor-stripped location
///
/// First occurrence wins, including its title. Entries with an empty
/// location (or an anchor with no page part) are dropped. The map is
/// ordered, which gives the lexicographic page order for free.
fn dedupe_locations(docs: Vec<MkdocsDoc>) -> BTreeMap<String, Option<String>> {
    let mut seen: BTreeMap<String, Option<String>> = BTreeMap::new();
    for doc in docs {
        let base = doc.location.split('#').next().unwrap_or("");
        if base.is_empty() {
            continue;
        }
        seen.entry(base.to_string()).or_insert(doc.title);
    }
    seen
}

#[async_trait]
impl Extractor for MkdocsExtractor {
    fn doc_type(&self) -> DocType {
        DocType::Mkdocs
    }

    fn index_path(&self) -> &'static str {
        MKDOCS_INDEX_PATH
    }

    async fn extract(
        &self,
        fetcher: &Fetcher,
        docs_url: &str,
        raw_index: &str,
        source_repo_url: Option<&str>,
    ) -> Result<InventoryResult, InventoryError> {
        let index: MkdocsIndex =
            serde_json::from_str(raw_index).map_err(InventoryError::IndexJson)?;
        let locations = dedupe_locations(index.docs);
        if locations.is_empty() {
            warn!("Search index contains no documents");
        }
        info!(documents = locations.len(), "Parsed MkDocs search index");

        // A supplied repository base wins; otherwise scrape the site root
        // for an edit link. Inference failure only downgrades to "no
        // source URL", it never aborts the run.
        let source_repo_url = match source_repo_url {
            Some(url) => Some(url.to_string()),
            None => match fetcher.fetch_body(docs_url).await {
                Some(html) => {
                    let inferred = infer_repo_base(&html);
                    match &inferred {
                        Some(base) => info!(repo = %base, "Inferred source repository from edit link"),
                        None => warn!("No edit link found on the site root, source URLs unavailable"),
                    }
                    inferred
                }
                None => {
                    warn!("Could not fetch the site root for repository inference");
                    None
                }
            },
        };
        let repo_base = source_repo_url.as_deref().map(normalize_repo_base);

        let pages: Vec<PageRecord> = locations
            .into_iter()
            .map(|(location, title)| {
                let docname = location
                    .strip_suffix(".html")
                    .unwrap_or(&location)
                    .to_string();
                let source_filename = format!("{docname}.md");
                let source_url = repo_base
                    .as_deref()
                    .map(|base| format!("{base}{source_filename}"));
                PageRecord {
                    html_url: format!("{docs_url}{location}"),
                    docname,
                    title,
                    source_filename,
                    repo_source_url: source_url.clone(),
                    source_url,
                }
            })
            .collect();

        Ok(InventoryResult {
            docs_url: docs_url.to_string(),
            doc_type: DocType::Mkdocs,
            // MkDocs sites do not publish a raw-sources directory
            has_sources_dir: false,
            source_repo_url,
            total_pages: pages.len(),
            pages,
            validation: None,
        })
    }
}
