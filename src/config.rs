//! Configuration document handling.
//!
//! The scanner is driven by a YAML document listing tracked components:
//!
//! ```yaml
//! versions:
//!   - name: traefik
//!     current:
//!       type: dockerfile
//!       params:
//!         path: ./Dockerfile
//!     latest:
//!       type: github_release
//!       params:
//!         owner: traefik
//!         repository: traefik
//! ```
//!
//! Loading or parsing failure here is the one error that aborts a run;
//! everything downstream is component-local.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::model::ComponentSpec;

/// The parsed configuration document.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Tracked components, scanned in document order.
    pub versions: Vec<ComponentSpec>,
}

impl Config {
    /// Loads and parses the configuration document at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid
    /// component list.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_parses_components() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
versions:
  - name: widget
    current:
      type: dockerfile
      params:
        path: ./Dockerfile
    latest:
      type: github_release
      params:
        owner: acme
        repository: widget
  - name: gadget
    current:
      type: constant
    latest:
      type: constant
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.versions.len(), 2);

        let widget = &config.versions[0];
        assert_eq!(widget.name, "widget");
        assert_eq!(widget.current.kind, "dockerfile");
        assert_eq!(widget.current.require_str("path").unwrap(), "./Dockerfile");
        assert_eq!(widget.latest.require_str("owner").unwrap(), "acme");

        // Params are optional for spiders that take none.
        assert!(config.versions[1].current.params.is_empty());
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        assert!(Config::load("/nonexistent/versions.yaml").is_err());
    }

    #[test]
    fn test_load_malformed_document_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "versions: not-a-list").unwrap();
        assert!(Config::load(file.path()).is_err());
    }
}
