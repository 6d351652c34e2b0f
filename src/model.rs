//! Core data types for tracked components and scan results.
//!
//! - [`ComponentSpec`] - one tracked component with a current and latest source
//! - [`SourceSpec`] - adapter type plus adapter-specific parameters
//! - [`Comparison`] - the per-component outcome of one scan pass

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One tracked component from the configuration document.
///
/// Immutable once parsed; a fresh scan re-reads the document.
#[derive(Debug, Clone, Deserialize)]
pub struct ComponentSpec {
    /// Unique display key.
    pub name: String,
    /// Where the currently deployed/installed version comes from.
    pub current: SourceSpec,
    /// Where the latest upstream version comes from.
    pub latest: SourceSpec,
}

/// Selects a spider implementation and carries its parameters.
///
/// The adapter type stays a plain string at the config boundary so an
/// unknown type surfaces as a component-local configuration error from the
/// factory, not as a document parse failure that would abort the whole run.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceSpec {
    /// Spider type identifier, e.g. `github_release` or `dockerfile`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Adapter-specific parameters, passed through verbatim.
    #[serde(default)]
    pub params: HashMap<String, serde_yaml::Value>,
}

impl SourceSpec {
    /// Looks up a required string parameter.
    ///
    /// # Errors
    ///
    /// Returns [`SpiderError::Config`](crate::error::SpiderError::Config)
    /// if the parameter is missing or not a string.
    pub fn require_str(&self, key: &str) -> Result<String, crate::error::SpiderError> {
        match self.params.get(key).and_then(|v| v.as_str()) {
            Some(s) => Ok(s.to_string()),
            None => Err(crate::error::SpiderError::Config(format!(
                "spider '{}' requires string parameter '{}'",
                self.kind, key
            ))),
        }
    }

    /// Looks up an optional string parameter.
    pub fn optional_str(&self, key: &str) -> Option<String> {
        self.params
            .get(key)
            .and_then(|v| v.as_str())
            .map(str::to_string)
    }
}

/// The outcome of scanning one component.
///
/// Produced once per [`ComponentSpec`] per scan and consumed immediately by
/// the reporter. On failure the fields fetched before the error are kept,
/// so a broken `latest` source still reports the current version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_raw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_raw: Option<String>,
    /// Canonical (possibly beautified) current version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,
    /// Canonical (possibly beautified) latest version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest: Option<String>,
    pub drifted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Comparison {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            current_raw: None,
            latest_raw: None,
            current: None,
            latest: None,
            drifted: false,
            error: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
