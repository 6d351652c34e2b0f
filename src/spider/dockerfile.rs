use async_trait::async_trait;
use regex::Regex;
use std::fs;

use crate::error::SpiderError;

/// Reads the current version out of a local Dockerfile.
///
/// Expects a line of the form `FROM jada/jada:1.2.3` (an optional `v`
/// before the version is tolerated) and returns the first match's version
/// capture.
pub struct DockerfileSpider {
    path: String,
    pattern: Regex,
}

impl DockerfileSpider {
    pub fn new(path: String) -> Self {
        Self {
            path,
            pattern: Regex::new(r"^FROM .*:v?(\d.*)$").expect("valid image reference pattern"),
        }
    }
}

#[async_trait]
impl super::Spider for DockerfileSpider {
    fn name(&self) -> &'static str {
        "dockerfile"
    }

    async fn fetch(&self) -> Result<String, SpiderError> {
        let content = fs::read_to_string(&self.path)
            .map_err(|e| SpiderError::NotFound(format!("cannot open {}: {}", self.path, e)))?;

        for line in content.lines() {
            if let Some(captures) = self.pattern.captures(line) {
                return Ok(captures[1].to_string());
            }
        }

        Err(SpiderError::NotFound(format!(
            "no versioned FROM line in {}",
            self.path
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::super::Spider;
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_fetch_returns_first_from_line_version() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# build image").unwrap();
        writeln!(file, "FROM acme/widget:1.4.0").unwrap();
        writeln!(file, "FROM acme/other:9.9.9").unwrap();

        let spider = DockerfileSpider::new(file.path().to_string_lossy().into_owned());
        assert_eq!(spider.fetch().await.unwrap(), "1.4.0");
    }

    #[tokio::test]
    async fn test_fetch_tolerates_v_prefix() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "FROM acme/widget:v2.0.1-alpine").unwrap();

        let spider = DockerfileSpider::new(file.path().to_string_lossy().into_owned());
        assert_eq!(spider.fetch().await.unwrap(), "2.0.1-alpine");
    }

    #[tokio::test]
    async fn test_fetch_without_matching_line_is_not_found() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "FROM scratch").unwrap();
        writeln!(file, "COPY . /app").unwrap();

        let spider = DockerfileSpider::new(file.path().to_string_lossy().into_owned());
        assert!(matches!(
            spider.fetch().await,
            Err(SpiderError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_missing_file_is_not_found() {
        let spider = DockerfileSpider::new("/nonexistent/Dockerfile".to_string());
        assert!(matches!(
            spider.fetch().await,
            Err(SpiderError::NotFound(_))
        ));
    }
}
