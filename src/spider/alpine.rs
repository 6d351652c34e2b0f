use async_trait::async_trait;
use scraper::{Html, Selector};

use super::http;
use crate::error::SpiderError;

pub const DEFAULT_BASE_URL: &str = "https://pkgs.alpinelinux.org";

/// Scrapes a package version from the Alpine package index.
///
/// The index has no JSON API, so the version is read out of the first
/// `td.version` cell of the package page. This depends on third-party page
/// structure staying stable; when the layout changes the spider fails with
/// a parse error rather than guessing.
pub struct AlpinePackageSpider {
    client: reqwest::Client,
    base_url: String,
    package: String,
    branch: String,
}

impl AlpinePackageSpider {
    pub fn new(client: reqwest::Client, base_url: String, package: String, branch: String) -> Self {
        Self {
            client,
            base_url,
            package,
            branch,
        }
    }
}

#[async_trait]
impl super::Spider for AlpinePackageSpider {
    fn name(&self) -> &'static str {
        "alpine"
    }

    async fn fetch(&self) -> Result<String, SpiderError> {
        let url = format!(
            "{}/package/{}/main/x86_64/{}",
            self.base_url, self.branch, self.package
        );
        let body = http::get(&self.client, &url).await?.text().await?;

        let document = Html::parse_document(&body);
        let selector = Selector::parse("td.version").expect("valid selector");

        let cell = document.select(&selector).next().ok_or_else(|| {
            SpiderError::Parse(format!(
                "no version cell on package page for {} ({})",
                self.package, self.branch
            ))
        })?;

        let version = cell.text().collect::<String>().trim().to_string();
        if version.is_empty() {
            return Err(SpiderError::Parse(format!(
                "empty version cell on package page for {}",
                self.package
            )));
        }
        Ok(version)
    }
}
