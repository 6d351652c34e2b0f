use async_trait::async_trait;
use std::process::Command;
use tracing::debug;

use crate::error::SpiderError;

/// Label keys tried in preference order by [`KubectlLabelSpider`].
const VERSION_LABELS: [&str; 2] = ["app.kubernetes.io/version", "version"];

/// Retrieves a resource manifest through the cluster query command and
/// parses it as YAML.
fn manifest(
    command: &str,
    kind: &str,
    name: &str,
    namespace: &str,
) -> Result<serde_yaml::Value, SpiderError> {
    let output = Command::new(command)
        .args(["get", kind, name, "-n", namespace, "-o", "yaml"])
        .output()
        .map_err(|e| SpiderError::Fetch(format!("failed to run {}: {}", command, e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SpiderError::Fetch(format!(
            "{} get {} {} failed: {}",
            command,
            kind,
            name,
            stderr.trim()
        )));
    }

    serde_yaml::from_slice(&output.stdout)
        .map_err(|e| SpiderError::Parse(format!("manifest of {} {} is not YAML: {}", kind, name, e)))
}

/// Walks a dotted field path into a parsed manifest.
///
/// Numeric segments index into lists, everything else keys into mappings.
fn lookup_path<'a>(
    value: &'a serde_yaml::Value,
    path: &str,
) -> Result<&'a serde_yaml::Value, SpiderError> {
    let mut cursor = value;
    for segment in path.split('.') {
        cursor = match segment.parse::<usize>() {
            Ok(index) => cursor.as_sequence().and_then(|seq| seq.get(index)),
            Err(_) => cursor.get(segment),
        }
        .ok_or_else(|| {
            SpiderError::Parse(format!("path segment '{}' missing in '{}'", segment, path))
        })?;
    }
    Ok(cursor)
}

/// Splits an image reference on its last `:` and returns the tag.
fn image_tag(image: &str) -> Result<String, SpiderError> {
    match image.rsplit_once(':') {
        Some((_, tag)) => Ok(tag.to_string()),
        None => Err(SpiderError::Parse(format!(
            "image reference '{}' has no tag",
            image
        ))),
    }
}

/// Reads a version label off a cluster resource.
///
/// Tries `app.kubernetes.io/version` first and falls back to `version`,
/// matching how charts commonly label their workloads.
pub struct KubectlLabelSpider {
    command: String,
    kind: String,
    name: String,
    namespace: String,
}

impl KubectlLabelSpider {
    pub fn new(kind: String, name: String, namespace: String) -> Self {
        Self {
            command: "kubectl".to_string(),
            kind,
            name,
            namespace,
        }
    }

    #[cfg(test)]
    fn with_command(mut self, command: &str) -> Self {
        self.command = command.to_string();
        self
    }
}

#[async_trait]
impl super::Spider for KubectlLabelSpider {
    fn name(&self) -> &'static str {
        "kubectl_label"
    }

    async fn fetch(&self) -> Result<String, SpiderError> {
        let manifest = manifest(&self.command, &self.kind, &self.name, &self.namespace)?;
        let labels = lookup_path(&manifest, "metadata.labels")?;

        for key in VERSION_LABELS {
            if let Some(version) = labels.get(key).and_then(|v| v.as_str()) {
                debug!(kind = %self.kind, name = %self.name, key, version, "label version");
                return Ok(version.to_string());
            }
        }

        Err(SpiderError::NotFound(format!(
            "{} {} carries no version label",
            self.kind, self.name
        )))
    }
}

/// Reads the image tag out of a cluster resource manifest.
///
/// The dotted `path` points at an image reference, e.g.
/// `spec.template.spec.containers.0.image`; the tag after the last `:` is
/// the version.
pub struct KubectlImageSpider {
    command: String,
    kind: String,
    name: String,
    namespace: String,
    path: String,
}

impl KubectlImageSpider {
    pub fn new(kind: String, name: String, namespace: String, path: String) -> Self {
        Self {
            command: "kubectl".to_string(),
            kind,
            name,
            namespace,
            path,
        }
    }

    #[cfg(test)]
    fn with_command(mut self, command: &str) -> Self {
        self.command = command.to_string();
        self
    }
}

#[async_trait]
impl super::Spider for KubectlImageSpider {
    fn name(&self) -> &'static str {
        "kubectl_image"
    }

    async fn fetch(&self) -> Result<String, SpiderError> {
        let manifest = manifest(&self.command, &self.kind, &self.name, &self.namespace)?;
        let value = lookup_path(&manifest, &self.path)?;

        let image = value.as_str().ok_or_else(|| {
            SpiderError::Parse(format!("value at '{}' is not a string", self.path))
        })?;

        image_tag(image)
    }
}
