//! Text Translator Core Library
//!
//! This library provides the translation session layer:
//! - A caching `TranslationManager` over an external translation provider
//! - Paragraph-preserving segmentation (`text`)
//! - Order-preserving batch translation with per-item failure isolation
//! - A bounded, append-only translation history log
//!
//! The provider call is the only network operation; everything else is
//! in-memory and safe for concurrent use.

pub mod batch;
pub mod cache;
pub mod config;
pub mod error;
pub mod history;
pub mod provider;
pub mod text;
pub mod util;

pub use batch::{BatchItem, BatchTranslator, ItemStatus};
pub use cache::{CacheKey, TranslationCache};
pub use config::{
    AppConfig, BatchConfig, CacheConfig, Lang, LanguageOption, ProviderConfig,
    language_name, language_options, is_supported_language,
    DEFAULT_SOURCE_LANG, DEFAULT_TARGET_LANG,
};
pub use error::{Error, ErrorKind, Result};
pub use history::{HistoryRecord, TranslationHistory};
pub use provider::{create_provider, OpenAiProvider, ProviderInfo, TranslationProvider};
pub use text::Paragraph;
pub use util::clear_translation_cache;

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Translation session layer: routes requests through the cache and the
/// provider, optionally recording completions into a shared history.
pub struct TranslationManager {
    provider: Arc<dyn TranslationProvider>,
    cache: TranslationCache,
    history: Option<Arc<TranslationHistory>>,
    config: AppConfig,
}

/// Per-line status of a paragraph translation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStatus {
    /// Line was translated
    Translated,
    /// Blank line, passed through untouched
    Blank,
    /// Provider failed; line passed through untranslated
    /// (only with `skip_failed_lines`)
    Failed,
}

/// Outcome for one line of a paragraph translation
#[derive(Debug, Clone, Serialize)]
pub struct LineOutcome {
    pub source: String,
    pub translated: Option<String>,
    pub status: LineStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of `translate_paragraph_detailed`
#[derive(Debug, Clone, Serialize)]
pub struct ParagraphTranslation {
    /// Reassembled text: original separators, original line order
    pub text: String,
    /// One outcome per input line, in input order
    pub lines: Vec<LineOutcome>,
}

impl ParagraphTranslation {
    /// Whether any line passed through untranslated after a failure
    pub fn has_failures(&self) -> bool {
        self.lines
            .iter()
            .any(|line| matches!(line.status, LineStatus::Failed))
    }
}

impl TranslationManager {
    /// Create a new manager with the given configuration
    pub fn new(config: AppConfig) -> Result<Self> {
        let provider = create_provider(&config.provider)?;
        let cache = TranslationCache::new(&config.cache)?;

        Ok(Self {
            provider,
            cache,
            history: None,
            config,
        })
    }

    /// Create with a custom provider (test seam, alternative backends)
    pub fn with_provider(
        provider: Arc<dyn TranslationProvider>,
        config: AppConfig,
    ) -> Result<Self> {
        let cache = TranslationCache::new(&config.cache)?;

        Ok(Self {
            provider,
            cache,
            history: None,
            config,
        })
    }

    /// Record successful translations into a shared history.
    ///
    /// The manager never creates its own history; it only writes to one
    /// injected here.
    pub fn with_history(mut self, history: Arc<TranslationHistory>) -> Self {
        self.history = Some(history);
        self
    }

    /// Translate using the configured language pair.
    pub async fn translate(&self, text: &str) -> Result<String> {
        self.translate_pair(text, &self.config.source_lang, &self.config.target_lang)
            .await
    }

    /// Translate between an explicit language pair.
    ///
    /// Fails with `Error::EmptyInput` if the text is empty after cleaning.
    /// A cache hit returns without touching the provider; concurrent misses
    /// for the same key make exactly one provider call. Provider failures
    /// are surfaced unmodified and never cached.
    pub async fn translate_pair(&self, text: &str, source: &Lang, target: &Lang) -> Result<String> {
        let cleaned = text::clean(text);
        if cleaned.is_empty() {
            return Err(Error::EmptyInput);
        }

        let key = CacheKey::new(&cleaned, source, target);

        let translated = if let Some(cached) = self.cache.get(&key).await {
            debug!("Cache hit for key {}", key);
            cached
        } else {
            info!(
                "Translating {} -> {} with {}",
                source,
                target,
                self.provider.name()
            );

            let provider = Arc::clone(&self.provider);
            let request_text = cleaned.clone();
            let source = source.clone();
            let target = target.clone();

            self.cache
                .get_or_translate(&key, async move {
                    provider.translate(&request_text, &source, &target).await
                })
                .await?
        };

        self.record(&cleaned, &translated);
        Ok(translated)
    }

    /// Translate text line by line, preserving paragraph structure.
    ///
    /// Blank lines and the original line separators pass through untouched;
    /// each non-blank line is translated independently (its own cache key).
    /// Any line failure fails the whole call unless `skip_failed_lines` is
    /// configured, in which case failed lines pass through untranslated.
    pub async fn translate_paragraph(&self, text: &str) -> Result<String> {
        self.translate_paragraph_detailed(text)
            .await
            .map(|result| result.text)
    }

    /// As `translate_paragraph`, additionally reporting per-line outcomes.
    pub async fn translate_paragraph_detailed(&self, text: &str) -> Result<ParagraphTranslation> {
        if text.trim().is_empty() {
            return Err(Error::EmptyInput);
        }

        let source = &self.config.source_lang;
        let target = &self.config.target_lang;
        let paragraph = Paragraph::split(text);

        let mut outputs = Vec::with_capacity(paragraph.len());
        let mut lines = Vec::with_capacity(paragraph.len());

        for line in paragraph.lines() {
            if line.trim().is_empty() {
                outputs.push(line.clone());
                lines.push(LineOutcome {
                    source: line.clone(),
                    translated: None,
                    status: LineStatus::Blank,
                    error: None,
                });
                continue;
            }

            match self.translate_pair(line, source, target).await {
                Ok(translated) => {
                    outputs.push(translated.clone());
                    lines.push(LineOutcome {
                        source: line.clone(),
                        translated: Some(translated),
                        status: LineStatus::Translated,
                        error: None,
                    });
                }
                Err(e) if self.config.skip_failed_lines => {
                    warn!("Line failed, passing through untranslated: {}", e);
                    outputs.push(line.clone());
                    lines.push(LineOutcome {
                        source: line.clone(),
                        translated: None,
                        status: LineStatus::Failed,
                        error: Some(e.to_string()),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        Ok(ParagraphTranslation {
            text: paragraph.join_with(&outputs),
            lines,
        })
    }

    /// Whether a translation for this request is already cached.
    pub async fn is_cached(&self, text: &str, source: &Lang, target: &Lang) -> bool {
        let cleaned = text::clean(text);
        self.cache
            .contains(&CacheKey::new(&cleaned, source, target))
            .await
    }

    /// Number of cached translations.
    pub async fn cache_size(&self) -> u64 {
        self.cache.size().await
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn provider_info(&self) -> ProviderInfo {
        self.provider.info()
    }

    fn record(&self, source: &str, translated: &str) {
        if let Some(ref history) = self.history
            && let Err(e) = history.add(source, translated)
        {
            // A provider returning empty output is not a completed
            // translation; skip the record rather than fail the call.
            debug!("History record rejected: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.source_lang.as_str(), "en");
        assert_eq!(config.target_lang.as_str(), "kn");
        assert!(!config.skip_failed_lines);
    }
}
