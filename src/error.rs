//! Error taxonomy for spiders and the scan pipeline.
//!
//! All four kinds are component-local: the orchestrator captures them into
//! the component's [`Comparison`](crate::model::Comparison) and keeps
//! scanning. Only a failure to load the configuration document itself
//! aborts a run, and that is handled at the binary boundary with `anyhow`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpiderError {
    /// Unknown adapter type or missing/malformed required parameter.
    /// Raised at construction time, before any I/O.
    #[error("configuration error: {0}")]
    Config(String),

    /// Upstream unreachable, non-success response status, or exhausted
    /// retries.
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// Upstream reachable but structurally unexpected: missing HTML
    /// element, missing JSON field, malformed image reference.
    #[error("unexpected response structure: {0}")]
    Parse(String),

    /// Upstream reachable and well-formed, but the requested version
    /// information is absent.
    #[error("version not found: {0}")]
    NotFound(String),
}

impl From<reqwest::Error> for SpiderError {
    fn from(err: reqwest::Error) -> Self {
        SpiderError::Fetch(err.to_string())
    }
}
