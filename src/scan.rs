//! Scan orchestration.
//!
//! [`Scanner::scan`] turns a component list into a lazy stream of
//! [`Comparison`] values. Components are fully independent, so a failure
//! in one never aborts the rest; each error is captured into its own
//! result and scanning continues.

use futures::stream::{self, Stream, StreamExt};
use tracing::{debug, warn};

use crate::error::SpiderError;
use crate::model::{ComponentSpec, Comparison, SourceSpec};
use crate::spider::{self, http};
use crate::version::normalize;

/// Drives one scan pass over a set of tracked components.
///
/// Owns the HTTP client shared by every spider it constructs; spiders
/// receive it explicitly at construction rather than reaching for global
/// state, so they stay independently testable.
pub struct Scanner {
    client: reqwest::Client,
}

impl Scanner {
    pub fn new() -> Self {
        Self {
            client: http::client(),
        }
    }

    /// Scans `components` in order, yielding one [`Comparison`] each.
    ///
    /// The stream is single-pass and produces each element on demand as
    /// its component is processed; re-invoke `scan` for a fresh pass.
    pub fn scan<'a>(
        &'a self,
        components: &'a [ComponentSpec],
        beautify: bool,
    ) -> impl Stream<Item = Comparison> + 'a {
        stream::iter(components).then(move |component| self.scan_component(component, beautify))
    }

    async fn scan_component(&self, component: &ComponentSpec, beautify: bool) -> Comparison {
        let mut comparison = Comparison::new(&component.name);

        let current = match self.fetch_version(&component.current).await {
            Ok(raw) => {
                comparison.current_raw = Some(raw.clone());
                let canonical = normalize(&raw, beautify);
                comparison.current = Some(canonical.clone());
                canonical
            }
            Err(e) => {
                warn!(component = %component.name, source = %component.current.kind, error = %e, "current version lookup failed");
                comparison.error = Some(format!("current ({}): {}", component.current.kind, e));
                return comparison;
            }
        };

        let latest = match self.fetch_version(&component.latest).await {
            Ok(raw) => {
                comparison.latest_raw = Some(raw.clone());
                let canonical = normalize(&raw, beautify);
                comparison.latest = Some(canonical.clone());
                canonical
            }
            Err(e) => {
                warn!(component = %component.name, source = %component.latest.kind, error = %e, "latest version lookup failed");
                comparison.error = Some(format!("latest ({}): {}", component.latest.kind, e));
                return comparison;
            }
        };

        comparison.drifted = current != latest;
        debug!(
            component = %component.name,
            current,
            latest,
            drifted = comparison.drifted,
            "compared"
        );
        comparison
    }

    async fn fetch_version(&self, source: &SourceSpec) -> Result<String, SpiderError> {
        let spider = spider::build_spider(source, &self.client)?;
        spider.fetch().await
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}
