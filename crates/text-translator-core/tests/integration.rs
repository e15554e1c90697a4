//! Integration tests for text-translator-core
//!
//! These tests verify the session layer end-to-end with a mock provider:
//! - Caching (idempotence, failure isolation, concurrency coalescing)
//! - Paragraph translation (structure preservation, skip-failed-lines)
//! - Batch translation (ordering, partial failure)
//! - History recording and bounds

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use text_translator_core::{
    provider::ProviderInfo, AppConfig, BatchTranslator, Error, ErrorKind, Lang,
    TranslationHistory, TranslationManager, TranslationProvider,
};

// =============================================================================
// Mock Provider for Testing
// =============================================================================

/// A mock provider that returns predictable translations without network
/// calls, counts invocations, and can inject failures.
struct MockProvider {
    /// Prefix added to translations when no fixed response matches
    prefix: String,
    /// Exact responses by provider input text
    responses: HashMap<String, String>,
    /// Fail any request whose text contains this marker
    fail_on: Option<String>,
    /// Fail the first N requests regardless of text
    fail_first: AtomicUsize,
    /// Artificial latency per request
    delay: Option<Duration>,
    /// Total number of translate calls
    calls: AtomicUsize,
}

impl MockProvider {
    fn new() -> Self {
        Self {
            prefix: "[TL]".to_string(),
            responses: HashMap::new(),
            fail_on: None,
            fail_first: AtomicUsize::new(0),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    fn with_response(mut self, text: &str, translated: &str) -> Self {
        self.responses.insert(text.to_string(), translated.to_string());
        self
    }

    fn failing_on(mut self, marker: &str) -> Self {
        self.fail_on = Some(marker.to_string());
        self
    }

    fn failing_first(self, n: usize) -> Self {
        self.fail_first.store(n, Ordering::SeqCst);
        self
    }

    fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationProvider for MockProvider {
    async fn translate(&self, text: &str, _source: &Lang, _target: &Lang) -> Result<String, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self
            .fail_first
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(Error::Provider("mock provider failure".to_string()));
        }

        if let Some(ref marker) = self.fail_on
            && text.contains(marker)
        {
            return Err(Error::Provider("mock provider failure".to_string()));
        }

        if let Some(fixed) = self.responses.get(text) {
            return Ok(fixed.clone());
        }

        Ok(format!("{} {}", self.prefix, text))
    }

    fn name(&self) -> &'static str {
        "mock"
    }

    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            name: "mock",
            requires_api_key: false,
            supports_auto_detect: false,
        }
    }
}

// =============================================================================
// Test Fixtures
// =============================================================================

fn test_config() -> AppConfig {
    AppConfig::default()
}

fn manager_with(provider: Arc<MockProvider>, config: AppConfig) -> TranslationManager {
    TranslationManager::with_provider(provider, config).expect("manager should build")
}

// =============================================================================
// Single Translation Tests
// =============================================================================

#[tokio::test]
async fn test_translate_returns_provider_output() {
    let provider = Arc::new(
        MockProvider::new().with_response("Hello World", "ನಮಸ್ಕಾರ ಜಗತ್ತು"),
    );
    let manager = manager_with(Arc::clone(&provider), test_config());

    let translated = manager.translate("Hello World").await.expect("translate");
    assert_eq!(translated, "ನಮಸ್ಕಾರ ಜಗತ್ತು");

    // Cached under the normalized (lowercased, cleaned) key
    let en = Lang::new("en");
    let kn = Lang::new("kn");
    assert!(manager.is_cached("hello world", &en, &kn).await);
    assert!(manager.is_cached("Hello World", &en, &kn).await);
    assert!(!manager.is_cached("Hello World", &en, &Lang::new("hi")).await);
}

#[tokio::test]
async fn test_translate_cleans_input_before_translating() {
    let provider = Arc::new(MockProvider::new());
    let manager = manager_with(Arc::clone(&provider), test_config());

    let translated = manager.translate("  Hello   World  ").await.expect("translate");
    assert_eq!(translated, "[TL] Hello World");
}

#[tokio::test]
async fn test_translate_is_idempotent_and_caches() {
    let provider = Arc::new(MockProvider::new());
    let manager = manager_with(Arc::clone(&provider), test_config());

    let first = manager.translate("Hello").await.expect("first call");
    let second = manager.translate("Hello").await.expect("second call");

    assert_eq!(first, second);
    assert_eq!(provider.call_count(), 1, "second call must not hit the provider");
}

#[tokio::test]
async fn test_case_variants_share_a_cache_entry() {
    let provider = Arc::new(MockProvider::new());
    let manager = manager_with(Arc::clone(&provider), test_config());

    let first = manager.translate("Hello World").await.expect("first");
    let second = manager.translate("hello world").await.expect("second");

    assert_eq!(first, second);
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_empty_input_is_rejected_without_provider_call() {
    let provider = Arc::new(MockProvider::new());
    let manager = manager_with(Arc::clone(&provider), test_config());

    for text in ["", "   ", "\n\n", " \t \n "] {
        let result = manager.translate(text).await;
        assert!(
            matches!(result, Err(Error::EmptyInput)),
            "expected EmptyInput for {text:?}"
        );
    }

    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_provider_failure_is_not_cached() {
    let provider = Arc::new(MockProvider::new().failing_first(1));
    let manager = manager_with(Arc::clone(&provider), test_config());

    let first = manager.translate("Hello").await;
    assert!(matches!(first, Err(Error::Provider(_))));

    let en = Lang::new("en");
    let kn = Lang::new("kn");
    assert!(
        !manager.is_cached("Hello", &en, &kn).await,
        "failed attempt must not poison the cache"
    );

    // The provider recovers; the retry goes through and caches
    let second = manager.translate("Hello").await.expect("retry should succeed");
    assert_eq!(second, "[TL] Hello");
    assert_eq!(provider.call_count(), 2);
    assert!(manager.is_cached("Hello", &en, &kn).await);
}

#[tokio::test]
async fn test_clear_cache_forces_retranslation() {
    let provider = Arc::new(MockProvider::new());
    let manager = manager_with(Arc::clone(&provider), test_config());

    manager.translate("Hello").await.expect("first");
    manager.clear_cache();
    manager.translate("Hello").await.expect("after clear");

    assert_eq!(provider.call_count(), 2);
}

#[tokio::test]
async fn test_bounded_cache_stays_within_limit() {
    let mut config = test_config();
    config.cache.memory_max_entries = Some(2);

    let provider = Arc::new(MockProvider::new());
    let manager = manager_with(Arc::clone(&provider), config);

    for i in 0..10 {
        manager.translate(&format!("text {i}")).await.expect("translate");
    }

    assert!(manager.cache_size().await <= 2);
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[tokio::test]
async fn test_concurrent_identical_requests_hit_provider_once() {
    let provider = Arc::new(MockProvider::new().with_delay(Duration::from_millis(20)));
    let manager = Arc::new(manager_with(Arc::clone(&provider), test_config()));

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let manager = Arc::clone(&manager);
            tokio::spawn(async move { manager.translate("Hello").await })
        })
        .collect();

    let mut results = Vec::new();
    for task in tasks {
        results.push(task.await.expect("task").expect("translate"));
    }

    assert_eq!(results.len(), 8);
    assert!(results.iter().all(|r| r == "[TL] Hello"));
    assert_eq!(
        provider.call_count(),
        1,
        "concurrent duplicate requests must coalesce into one provider call"
    );
}

// =============================================================================
// Paragraph Translation Tests
// =============================================================================

#[tokio::test]
async fn test_paragraph_preserves_structure() {
    let provider = Arc::new(MockProvider::new());
    let manager = manager_with(Arc::clone(&provider), test_config());

    let translated = manager
        .translate_paragraph("Hello\n\nWorld\n")
        .await
        .expect("paragraph");

    assert_eq!(translated, "[TL] Hello\n\n[TL] World\n");
    assert_eq!(provider.call_count(), 2, "blank lines never reach the provider");
}

#[tokio::test]
async fn test_paragraph_preserves_crlf_separators() {
    let provider = Arc::new(MockProvider::new());
    let manager = manager_with(Arc::clone(&provider), test_config());

    let translated = manager
        .translate_paragraph("one\r\ntwo")
        .await
        .expect("paragraph");

    assert_eq!(translated, "[TL] one\r\n[TL] two");
}

#[tokio::test]
async fn test_paragraph_lines_share_the_line_cache() {
    let provider = Arc::new(MockProvider::new());
    let manager = manager_with(Arc::clone(&provider), test_config());

    manager
        .translate_paragraph("Same line\nSame line\nSame line")
        .await
        .expect("paragraph");

    assert_eq!(provider.call_count(), 1, "each line is its own cache key");

    // A single-line call for the same text also hits the line cache
    manager.translate("Same line").await.expect("single");
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_paragraph_fails_whole_call_by_default() {
    let provider = Arc::new(MockProvider::new().failing_on("bad"));
    let manager = manager_with(Arc::clone(&provider), test_config());

    let result = manager.translate_paragraph("good line\nbad line\nanother").await;
    assert!(matches!(result, Err(Error::Provider(_))));
}

#[tokio::test]
async fn test_paragraph_skip_failed_lines_passes_through() {
    let mut config = test_config();
    config.skip_failed_lines = true;

    let provider = Arc::new(MockProvider::new().failing_on("bad"));
    let manager = manager_with(Arc::clone(&provider), config);

    let result = manager
        .translate_paragraph_detailed("good line\nbad line\n")
        .await
        .expect("paragraph with skip_failed_lines");

    assert_eq!(result.text, "[TL] good line\nbad line\n");
    assert!(result.has_failures());

    assert_eq!(result.lines.len(), 3);
    assert_eq!(result.lines[0].status, text_translator_core::LineStatus::Translated);
    assert_eq!(result.lines[1].status, text_translator_core::LineStatus::Failed);
    assert!(result.lines[1].error.as_deref().is_some_and(|e| e.contains("mock")));
    assert_eq!(result.lines[2].status, text_translator_core::LineStatus::Blank);
}

#[tokio::test]
async fn test_paragraph_rejects_blank_input() {
    let provider = Arc::new(MockProvider::new());
    let manager = manager_with(Arc::clone(&provider), test_config());

    let result = manager.translate_paragraph("\n\n").await;
    assert!(matches!(result, Err(Error::EmptyInput)));
    assert_eq!(provider.call_count(), 0);
}

// =============================================================================
// Batch Translation Tests
// =============================================================================

#[tokio::test]
async fn test_batch_preserves_length_and_order() {
    let provider = Arc::new(MockProvider::new());
    let manager = manager_with(Arc::clone(&provider), test_config());

    let inputs = ["alpha", "beta", "gamma", "delta"];
    let results = BatchTranslator::new(&manager).translate_list(&inputs).await;

    assert_eq!(results.len(), inputs.len());
    for (input, item) in inputs.iter().zip(&results) {
        assert_eq!(item.source, *input);
        assert_eq!(item.translated.as_deref(), Some(format!("[TL] {input}").as_str()));
        assert!(item.is_success());
    }
}

#[tokio::test]
async fn test_batch_order_survives_concurrent_completion() {
    let provider = Arc::new(
        MockProvider::new().with_delay(Duration::from_millis(10)),
    );
    let manager = manager_with(Arc::clone(&provider), test_config());

    let inputs: Vec<String> = (0..16).map(|i| format!("item {i}")).collect();
    let results = BatchTranslator::new(&manager)
        .with_concurrency(8)
        .translate_list(&inputs)
        .await;

    assert_eq!(results.len(), 16);
    for (input, item) in inputs.iter().zip(&results) {
        assert_eq!(item.source, *input);
    }
}

#[tokio::test]
async fn test_batch_isolates_item_failures() {
    let provider = Arc::new(MockProvider::new().failing_on("three"));
    let manager = manager_with(Arc::clone(&provider), test_config());

    let inputs = ["one", "two", "three", "four", "five"];
    let results = BatchTranslator::new(&manager)
        .with_concurrency(1)
        .translate_list(&inputs)
        .await;

    assert_eq!(results.len(), 5);

    let successes = results.iter().filter(|item| item.is_success()).count();
    assert_eq!(successes, 4);

    let failed = &results[2];
    assert!(!failed.is_success());
    assert_eq!(failed.source, "three");
    assert_eq!(failed.error_kind, Some(ErrorKind::Provider));
    assert!(failed.translated.is_none());

    // Items after the failure were still attempted
    assert!(results[3].is_success());
    assert!(results[4].is_success());
    assert_eq!(provider.call_count(), 5);
}

#[tokio::test]
async fn test_batch_flags_empty_items() {
    let provider = Arc::new(MockProvider::new());
    let manager = manager_with(Arc::clone(&provider), test_config());

    let inputs = ["Hello", "   ", "World"];
    let results = BatchTranslator::new(&manager).translate_list(&inputs).await;

    assert_eq!(results.len(), 3);
    assert!(results[0].is_success());
    assert_eq!(results[1].error_kind, Some(ErrorKind::EmptyInput));
    assert!(results[2].is_success());
}

// =============================================================================
// History Tests
// =============================================================================

#[tokio::test]
async fn test_successful_translations_are_recorded() {
    let history = Arc::new(TranslationHistory::new());
    let provider = Arc::new(MockProvider::new());
    let manager = manager_with(Arc::clone(&provider), test_config())
        .with_history(Arc::clone(&history));

    manager.translate("Hello").await.expect("translate");
    manager.translate("World").await.expect("translate");

    let recent = history.get_recent(10);
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].source, "World");
    assert_eq!(recent[0].translated, "[TL] World");
    assert_eq!(recent[1].source, "Hello");
}

#[tokio::test]
async fn test_failed_translations_never_touch_history() {
    let history = Arc::new(TranslationHistory::new());
    let provider = Arc::new(MockProvider::new().failing_on("Hello"));
    let manager = manager_with(Arc::clone(&provider), test_config())
        .with_history(Arc::clone(&history));

    let result = manager.translate("Hello").await;
    assert!(result.is_err());
    assert!(history.is_empty());
}

#[tokio::test]
async fn test_bounded_history_through_manager() {
    let history = Arc::new(TranslationHistory::with_capacity(3));
    let provider = Arc::new(MockProvider::new());
    let manager = manager_with(Arc::clone(&provider), test_config())
        .with_history(Arc::clone(&history));

    for i in 0..5 {
        manager.translate(&format!("text {i}")).await.expect("translate");
    }

    let recent = history.get_recent(10);
    assert_eq!(recent.len(), 3);
    assert_eq!(recent[0].source, "text 4");
    assert_eq!(recent[2].source, "text 2");
}
