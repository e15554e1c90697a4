use async_trait::async_trait;

use crate::config::Lang;
use crate::error::Result;

/// Information about a provider backend
#[derive(Debug, Clone)]
pub struct ProviderInfo {
    /// Human-readable name
    pub name: &'static str,
    /// Whether this provider requires an API key
    pub requires_api_key: bool,
    /// Whether this provider supports auto-detection of source language
    pub supports_auto_detect: bool,
}

/// Capability consumed by the session layer: one opaque, fallible,
/// network-backed translation call.
///
/// Any failure (network, quota, invalid language) must surface as
/// `Error::Provider` with the backend's message; implementations own their
/// own timeout and retry policy.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Get information about this provider
    fn info(&self) -> ProviderInfo;

    /// Get the provider name (convenience method)
    fn name(&self) -> &'static str {
        self.info().name
    }

    /// Translate text from source language to target language
    async fn translate(
        &self,
        text: &str,
        source: &Lang,
        target: &Lang,
    ) -> Result<String>;

    /// Check if the provider is available (e.g., API key configured)
    fn is_available(&self) -> bool {
        true
    }
}
