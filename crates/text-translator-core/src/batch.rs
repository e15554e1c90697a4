//! Batch translation over an ordered list of independent inputs.
//!
//! Failures are isolated per item: one item's `EmptyInput` or `Provider`
//! error becomes an error entry in the result, and the remaining items are
//! still attempted. Output length and order always match the input,
//! regardless of completion order under concurrency.

use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::warn;

use crate::error::ErrorKind;
use crate::TranslationManager;

/// Per-item status in a batch result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Success,
    Error,
}

/// One entry of a batch result, in input order.
#[derive(Debug, Clone, Serialize)]
pub struct BatchItem {
    pub source: String,
    pub translated: Option<String>,
    pub status: ItemStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl BatchItem {
    fn success(source: String, translated: String) -> Self {
        Self {
            source,
            translated: Some(translated),
            status: ItemStatus::Success,
            error: None,
            error_kind: None,
        }
    }

    fn error(source: String, error: &crate::error::Error) -> Self {
        Self {
            source,
            translated: None,
            status: ItemStatus::Error,
            error: Some(error.to_string()),
            error_kind: Some(error.kind()),
        }
    }

    pub const fn is_success(&self) -> bool {
        matches!(self.status, ItemStatus::Success)
    }
}

/// Stateless coordinator translating an ordered list through a manager.
pub struct BatchTranslator<'a> {
    manager: &'a TranslationManager,
    max_concurrent: usize,
}

impl<'a> BatchTranslator<'a> {
    /// Create a batch translator using the manager's configured concurrency.
    pub fn new(manager: &'a TranslationManager) -> Self {
        Self {
            max_concurrent: manager.config().batch.max_concurrent.max(1),
            manager,
        }
    }

    /// Override the in-flight request bound (1 = sequential).
    pub fn with_concurrency(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    /// Translate every input, one result entry per input, in input order.
    pub async fn translate_list<S: AsRef<str>>(&self, texts: &[S]) -> Vec<BatchItem> {
        let owned: Vec<(usize, String)> = texts
            .iter()
            .enumerate()
            .map(|(index, text)| (index, text.as_ref().to_string()))
            .collect();
        let mut indexed: Vec<(usize, BatchItem)> = stream::iter(owned)
            .map(|(index, source)| async move {
                let item = match self.manager.translate(&source).await {
                    Ok(translated) => BatchItem::success(source, translated),
                    Err(e) => {
                        warn!("Batch item {} failed: {}", index, e);
                        BatchItem::error(source, &e)
                    }
                };
                (index, item)
            })
            .buffer_unordered(self.max_concurrent)
            .collect()
            .await;

        // Completion order is arbitrary under concurrency; restore input order
        indexed.sort_by_key(|(index, _)| *index);
        indexed.into_iter().map(|(_, item)| item).collect()
    }
}
