use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::http;
use crate::error::SpiderError;
use crate::version::normalize;

/// Default API base; overridable per source for self-hosted installs.
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
}

#[derive(Debug, Deserialize)]
struct Tag {
    name: String,
}

/// Fetches the latest release tag of a GitHub repository.
///
/// Without a major filter this hits the `releases/latest` endpoint, whose
/// tag is the actual latest version. Some upstreams interleave releases
/// from several major lines, so "latest" is not latest-for-our-major; with
/// a `major` filter the full release list is scanned instead and the first
/// release whose normalized tag starts with that prefix wins.
pub struct GithubReleaseSpider {
    client: reqwest::Client,
    base_url: String,
    owner: String,
    repository: String,
    major: Option<String>,
}

impl GithubReleaseSpider {
    pub fn new(
        client: reqwest::Client,
        base_url: String,
        owner: String,
        repository: String,
        major: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url,
            owner,
            repository,
            major,
        }
    }

    async fn latest_release(&self) -> Result<String, SpiderError> {
        let url = format!(
            "{}/repos/{}/{}/releases/latest",
            self.base_url, self.owner, self.repository
        );
        let release: Release = http::get(&self.client, &url).await?.json().await?;
        Ok(release.tag_name)
    }

    async fn latest_release_for_major(&self, major: &str) -> Result<String, SpiderError> {
        let url = format!(
            "{}/repos/{}/{}/releases",
            self.base_url, self.owner, self.repository
        );
        let releases: Vec<Release> = http::get(&self.client, &url).await?.json().await?;

        releases
            .into_iter()
            .map(|r| r.tag_name)
            .find(|tag| normalize(tag, true).starts_with(major))
            .ok_or_else(|| {
                SpiderError::NotFound(format!(
                    "no release of {}/{} matches major version {}",
                    self.owner, self.repository, major
                ))
            })
    }
}

#[async_trait]
impl super::Spider for GithubReleaseSpider {
    fn name(&self) -> &'static str {
        "github_release"
    }

    async fn fetch(&self) -> Result<String, SpiderError> {
        let tag = match &self.major {
            Some(major) => self.latest_release_for_major(major).await?,
            None => self.latest_release().await?,
        };
        debug!(owner = %self.owner, repository = %self.repository, %tag, "release tag");
        Ok(tag)
    }
}

/// Fetches the newest tag of a GitHub repository.
///
/// The tag listing is requested sorted descending by name. Registries and
/// repositories commonly carry a floating `latest` alias that is not a
/// version, so a tag literally named `latest` is skipped before picking
/// the top entry.
pub struct GithubTagSpider {
    client: reqwest::Client,
    base_url: String,
    owner: String,
    repository: String,
}

impl GithubTagSpider {
    pub fn new(
        client: reqwest::Client,
        base_url: String,
        owner: String,
        repository: String,
    ) -> Self {
        Self {
            client,
            base_url,
            owner,
            repository,
        }
    }
}

#[async_trait]
impl super::Spider for GithubTagSpider {
    fn name(&self) -> &'static str {
        "github_tag"
    }

    async fn fetch(&self) -> Result<String, SpiderError> {
        let url = format!(
            "{}/repos/{}/{}/tags?sort=name&direction=desc",
            self.base_url, self.owner, self.repository
        );
        let tags: Vec<Tag> = http::get(&self.client, &url).await?.json().await?;

        tags.into_iter()
            .map(|t| t.name)
            .find(|name| name != "latest")
            .ok_or_else(|| {
                SpiderError::NotFound(format!(
                    "no usable tag for {}/{}",
                    self.owner, self.repository
                ))
            })
    }
}
