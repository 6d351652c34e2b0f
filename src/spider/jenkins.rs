use async_trait::async_trait;
use scraper::{Html, Selector};

use super::http;
use crate::error::SpiderError;

pub const DEFAULT_URL: &str = "https://www.jenkins.io/changelog-stable/";

/// Scrapes the current Jenkins LTS version from the stable changelog page.
///
/// The newest entry is the first `h3` under `div.ratings`; its `id`
/// attribute carries the version, usually with a leading `v` that the page
/// adds and the spider trims. Structure-dependent like the other scrape
/// spiders.
pub struct JenkinsStableSpider {
    client: reqwest::Client,
    url: String,
}

impl JenkinsStableSpider {
    pub fn new(client: reqwest::Client, url: String) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl super::Spider for JenkinsStableSpider {
    fn name(&self) -> &'static str {
        "jenkins_stable"
    }

    async fn fetch(&self) -> Result<String, SpiderError> {
        let body = http::get(&self.client, &self.url).await?.text().await?;

        let document = Html::parse_document(&body);
        let selector = Selector::parse("div.ratings h3").expect("valid selector");

        let heading = document.select(&selector).next().ok_or_else(|| {
            SpiderError::Parse("no changelog heading on stable changelog page".to_string())
        })?;

        let id = heading.value().attr("id").ok_or_else(|| {
            SpiderError::Parse("changelog heading has no id attribute".to_string())
        })?;

        Ok(id.trim_start_matches('v').to_string())
    }
}
