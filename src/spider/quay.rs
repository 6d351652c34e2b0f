use async_trait::async_trait;
use serde::Deserialize;

use super::http;
use crate::error::SpiderError;

pub const DEFAULT_BASE_URL: &str = "https://quay.io/api/v1";

#[derive(Debug, Deserialize)]
struct TagListing {
    tags: Vec<Tag>,
}

#[derive(Debug, Deserialize)]
struct Tag {
    name: String,
}

/// Fetches the newest tag of a Quay.io repository.
///
/// Same contract as the GitHub tag spider: the listing is requested sorted
/// descending by name and a floating `latest` alias is skipped.
pub struct QuaySpider {
    client: reqwest::Client,
    base_url: String,
    owner: String,
    name: String,
}

impl QuaySpider {
    pub fn new(client: reqwest::Client, base_url: String, owner: String, name: String) -> Self {
        Self {
            client,
            base_url,
            owner,
            name,
        }
    }
}

#[async_trait]
impl super::Spider for QuaySpider {
    fn name(&self) -> &'static str {
        "quay"
    }

    async fn fetch(&self) -> Result<String, SpiderError> {
        let url = format!(
            "{}/repository/{}/{}/tag/?onlyActiveTags=true",
            self.base_url, self.owner, self.name
        );
        let listing: TagListing = http::get(&self.client, &url).await?.json().await?;

        listing
            .tags
            .into_iter()
            .map(|t| t.name)
            .find(|name| name != "latest")
            .ok_or_else(|| {
                SpiderError::NotFound(format!("no usable tag for {}/{}", self.owner, self.name))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::super::Spider;
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn test_fetch_skips_floating_latest() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/repository/acme/widget/tag/?onlyActiveTags=true")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"tags": [{"name": "latest"}, {"name": "2.1.0"}, {"name": "2.0.0"}]}"#,
            )
            .create_async()
            .await;

        let spider = QuaySpider::new(
            reqwest::Client::new(),
            server.url(),
            "acme".to_string(),
            "widget".to_string(),
        );

        assert_eq!(spider.fetch().await.unwrap(), "2.1.0");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_only_latest_is_not_found() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/repository/acme/widget/tag/?onlyActiveTags=true")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"tags": [{"name": "latest"}]}"#)
            .create_async()
            .await;

        let spider = QuaySpider::new(
            reqwest::Client::new(),
            server.url(),
            "acme".to_string(),
            "widget".to_string(),
        );

        assert!(matches!(
            spider.fetch().await,
            Err(SpiderError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_bad_status_is_a_fetch_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/repository/acme/widget/tag/?onlyActiveTags=true")
            .with_status(404)
            .create_async()
            .await;

        let spider = QuaySpider::new(
            reqwest::Client::new(),
            server.url(),
            "acme".to_string(),
            "widget".to_string(),
        );

        assert!(matches!(spider.fetch().await, Err(SpiderError::Fetch(_))));
    }
}
