//! Error types for docmap

use thiserror::Error;

/// Errors that can terminate an inventory run
///
/// Fetch-level failures (unreachable URLs, timeouts, non-success statuses)
/// are not errors: the fetcher reports them as `None`/`false` and callers
/// apply their own fallback logic. Only the failures below abort a run.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Documentation base URL is not http(s) or does not parse
    #[error("Invalid documentation URL: must start with http:// or https://")]
    InvalidUrl,

    /// Neither a Sphinx nor a MkDocs search index was reachable
    #[error("No Sphinx or MkDocs search index found at {0}")]
    UnknownGenerator(String),

    /// Index was reachable but the script wrapper did not match
    #[error("Unrecognized search index format: {0}")]
    IndexFormat(String),

    /// Index payload was located but is not valid JSON
    #[error("Invalid JSON in search index")]
    IndexJson(#[source] serde_json::Error),

    /// Failed to build the HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    /// Failed to serialize the inventory for output
    #[error("Failed to serialize inventory")]
    Serialize(#[source] serde_json::Error),
}
