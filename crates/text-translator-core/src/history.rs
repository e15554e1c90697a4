//! Append-only log of completed translations.
//!
//! The history is a separate store from the cache and is never consulted
//! for lookups. It is bounded (FIFO eviction at capacity) and safe to share
//! behind an `Arc` across tasks.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::VecDeque;

use crate::error::{Error, Result};

/// One completed translation event. Immutable once appended.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryRecord {
    /// Monotonic sequence id, unique within one history instance
    pub seq: u64,
    /// When the translation completed
    pub timestamp: DateTime<Utc>,
    pub source: String,
    pub translated: String,
}

struct HistoryInner {
    records: VecDeque<HistoryRecord>,
    next_seq: u64,
}

/// Capacity-bounded, time-ordered log of completed translations.
pub struct TranslationHistory {
    inner: Mutex<HistoryInner>,
    /// Maximum record count; None = unbounded
    max_records: Option<usize>,
}

impl TranslationHistory {
    /// Create an unbounded history
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(HistoryInner {
                records: VecDeque::new(),
                next_seq: 0,
            }),
            max_records: None,
        }
    }

    /// Create a history that keeps at most `max_records` entries,
    /// evicting the oldest on each append past capacity.
    pub fn with_capacity(max_records: usize) -> Self {
        Self {
            inner: Mutex::new(HistoryInner {
                records: VecDeque::with_capacity(max_records),
                next_seq: 0,
            }),
            max_records: Some(max_records),
        }
    }

    /// Append a record for a completed translation.
    ///
    /// Fails with `Error::InvalidRecord` if either string is empty or
    /// whitespace-only; valid records never fail.
    pub fn add(&self, source: &str, translated: &str) -> Result<HistoryRecord> {
        if source.trim().is_empty() {
            return Err(Error::InvalidRecord("empty source text".to_string()));
        }
        if translated.trim().is_empty() {
            return Err(Error::InvalidRecord("empty translated text".to_string()));
        }

        let mut inner = self.inner.lock();

        let record = HistoryRecord {
            seq: inner.next_seq,
            timestamp: Utc::now(),
            source: source.to_string(),
            translated: translated.to_string(),
        };
        inner.next_seq += 1;

        inner.records.push_back(record.clone());
        if let Some(max) = self.max_records {
            while inner.records.len() > max {
                inner.records.pop_front();
            }
        }

        Ok(record)
    }

    /// The `n` most recent records, most recent first.
    ///
    /// `n == 0` returns an empty vec; `n` larger than the current count
    /// returns everything.
    pub fn get_recent(&self, n: usize) -> Vec<HistoryRecord> {
        let inner = self.inner.lock();
        inner.records.iter().rev().take(n).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().records.is_empty()
    }

    /// Drop all records. Sequence ids keep counting up; they are unique
    /// for the lifetime of the instance, not reused after a clear.
    pub fn clear(&self) {
        self.inner.lock().records.clear();
    }
}

impl Default for TranslationHistory {
    fn default() -> Self {
        Self::new()
    }
}
