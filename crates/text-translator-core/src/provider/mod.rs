mod openai;
mod traits;

pub use openai::OpenAiProvider;
pub use traits::{ProviderInfo, TranslationProvider};

use std::sync::Arc;

use crate::config::ProviderConfig;
use crate::error::Result;

/// Create a provider from configuration
pub fn create_provider(config: &ProviderConfig) -> Result<Arc<dyn TranslationProvider>> {
    let provider = OpenAiProvider::new(
        config.api_base.clone(),
        config.api_key.clone(),
        config.model.clone(),
        config.retry_count,
        config.retry_delay_ms,
    );

    Ok(Arc::new(provider))
}
