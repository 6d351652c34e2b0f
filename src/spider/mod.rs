//! Version spiders.
//!
//! A spider knows how to retrieve a raw version token from exactly one kind
//! of upstream source. This module provides the [`Spider`] trait, one
//! implementation per source, and the [`build_spider`] factory that maps a
//! configured type identifier to a constructed instance.
//!
//! # Available Spiders
//!
//! | Type identifier | Source |
//! |-----------------|--------|
//! | `dockerfile` | `FROM` line of a local Dockerfile |
//! | `github_release` | GitHub release API (optionally filtered by major) |
//! | `github_tag` | GitHub tag listing |
//! | `quay` | Quay.io registry tag listing |
//! | `alpine` | Alpine package index page |
//! | `jenkins_stable` | Jenkins stable changelog page |
//! | `kubectl_label` | version label on a cluster resource |
//! | `kubectl_image` | image tag inside a cluster resource manifest |
//! | `constant` | fixed placeholder value |

mod alpine;
mod constant;
mod dockerfile;
mod github;
pub(crate) mod http;
mod jenkins;
mod kubectl;
mod quay;

pub use alpine::AlpinePackageSpider;
pub use constant::{ConstantSpider, CONSTANT_VERSION};
pub use dockerfile::DockerfileSpider;
pub use github::{GithubReleaseSpider, GithubTagSpider};
pub use jenkins::JenkinsStableSpider;
pub use kubectl::{KubectlImageSpider, KubectlLabelSpider};
pub use quay::QuaySpider;

use async_trait::async_trait;

use crate::error::SpiderError;
use crate::model::SourceSpec;

/// Trait for retrieving a raw version token from one upstream source.
///
/// Implementations are constructed once per scan from a [`SourceSpec`],
/// own only their immutable configuration, and hold no state across calls.
#[async_trait]
pub trait Spider: Send + Sync {
    /// Returns the type identifier this spider was built from.
    fn name(&self) -> &'static str;

    /// Fetches the raw version token.
    ///
    /// # Errors
    ///
    /// Returns [`SpiderError::Fetch`], [`SpiderError::Parse`] or
    /// [`SpiderError::NotFound`] depending on what went wrong upstream.
    async fn fetch(&self) -> Result<String, SpiderError>;
}

/// Constructs the spider selected by `spec.kind`.
///
/// Resolution is an exact match over the closed set of known type
/// identifiers. Unknown types and missing required parameters fail with
/// [`SpiderError::Config`] here, before any network call is attempted.
pub fn build_spider(
    spec: &SourceSpec,
    client: &reqwest::Client,
) -> Result<Box<dyn Spider>, SpiderError> {
    // `api_base` is accepted by every HTTP spider for self-hosted or
    // mirrored upstreams; it defaults to the public endpoint.
    match spec.kind.as_str() {
        "dockerfile" => Ok(Box::new(DockerfileSpider::new(spec.require_str("path")?))),
        "github_release" => Ok(Box::new(GithubReleaseSpider::new(
            client.clone(),
            api_base(spec, github::DEFAULT_BASE_URL),
            spec.require_str("owner")?,
            spec.require_str("repository")?,
            spec.optional_str("major"),
        ))),
        "github_tag" => Ok(Box::new(GithubTagSpider::new(
            client.clone(),
            api_base(spec, github::DEFAULT_BASE_URL),
            spec.require_str("owner")?,
            spec.require_str("repository")?,
        ))),
        "quay" => Ok(Box::new(QuaySpider::new(
            client.clone(),
            api_base(spec, quay::DEFAULT_BASE_URL),
            spec.require_str("owner")?,
            spec.require_str("name")?,
        ))),
        "alpine" => Ok(Box::new(AlpinePackageSpider::new(
            client.clone(),
            api_base(spec, alpine::DEFAULT_BASE_URL),
            spec.require_str("package")?,
            spec.require_str("branch")?,
        ))),
        "jenkins_stable" => Ok(Box::new(JenkinsStableSpider::new(
            client.clone(),
            api_base(spec, jenkins::DEFAULT_URL),
        ))),
        "kubectl_label" => Ok(Box::new(KubectlLabelSpider::new(
            spec.require_str("kind")?,
            spec.require_str("name")?,
            spec.require_str("namespace")?,
        ))),
        "kubectl_image" => Ok(Box::new(KubectlImageSpider::new(
            spec.require_str("kind")?,
            spec.require_str("name")?,
            spec.require_str("namespace")?,
            spec.require_str("path")?,
        ))),
        "constant" => Ok(Box::new(ConstantSpider)),
        other => Err(SpiderError::Config(format!(
            "unknown spider type '{}'",
            other
        ))),
    }
}

fn api_base(spec: &SourceSpec, default: &str) -> String {
    spec.optional_str("api_base")
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn spec(kind: &str, params: &[(&str, &str)]) -> SourceSpec {
        SourceSpec {
            kind: kind.to_string(),
            params: params
                .iter()
                .map(|(k, v)| (k.to_string(), serde_yaml::Value::from(*v)))
                .collect(),
        }
    }

    #[test]
    fn test_unknown_type_is_a_config_error() {
        let client = reqwest::Client::new();
        let result = build_spider(&spec("carrier_pigeon", &[]), &client);
        assert!(matches!(result, Err(SpiderError::Config(_))));
    }

    #[test]
    fn test_missing_required_parameter_is_a_config_error() {
        let client = reqwest::Client::new();
        let result = build_spider(&spec("github_release", &[("owner", "acme")]), &client);
        assert!(matches!(result, Err(SpiderError::Config(_))));
    }

    #[test]
    fn test_non_string_parameter_is_a_config_error() {
        let client = reqwest::Client::new();
        let mut params = HashMap::new();
        params.insert("path".to_string(), serde_yaml::Value::from(42));
        let source = SourceSpec {
            kind: "dockerfile".to_string(),
            params,
        };
        assert!(matches!(
            build_spider(&source, &client),
            Err(SpiderError::Config(_))
        ));
    }

    #[test]
    fn test_every_known_type_constructs() {
        let client = reqwest::Client::new();
        let specs = [
            spec("dockerfile", &[("path", "./Dockerfile")]),
            spec(
                "github_release",
                &[("owner", "acme"), ("repository", "widget")],
            ),
            spec(
                "github_release",
                &[("owner", "acme"), ("repository", "widget"), ("major", "3")],
            ),
            spec("github_tag", &[("owner", "acme"), ("repository", "widget")]),
            spec("quay", &[("owner", "acme"), ("name", "widget")]),
            spec("alpine", &[("package", "curl"), ("branch", "v3.20")]),
            spec("jenkins_stable", &[]),
            spec(
                "kubectl_label",
                &[("kind", "deployment"), ("name", "widget"), ("namespace", "prod")],
            ),
            spec(
                "kubectl_image",
                &[
                    ("kind", "deployment"),
                    ("name", "widget"),
                    ("namespace", "prod"),
                    ("path", "spec.template.spec.containers.0.image"),
                ],
            ),
            spec("constant", &[]),
        ];

        for source in &specs {
            let spider = build_spider(source, &client)
                .unwrap_or_else(|e| panic!("{} failed to build: {}", source.kind, e));
            assert!(!spider.name().is_empty());
        }
    }
}
