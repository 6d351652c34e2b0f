use async_trait::async_trait;

use crate::error::SpiderError;

/// Sentinel returned by [`ConstantSpider`].
pub const CONSTANT_VERSION: &str = "0.0.0-constant";

/// Always returns a fixed placeholder version.
///
/// Useful while wiring up a new component before its real sources exist;
/// never fails.
pub struct ConstantSpider;

#[async_trait]
impl super::Spider for ConstantSpider {
    fn name(&self) -> &'static str {
        "constant"
    }

    async fn fetch(&self) -> Result<String, SpiderError> {
        Ok(CONSTANT_VERSION.to_string())
    }
}
