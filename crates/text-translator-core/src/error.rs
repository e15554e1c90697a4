use serde::Serialize;
use thiserror::Error;

/// Unified error type for text-translator-core
///
/// This enum encompasses all error cases that can occur in the library:
/// - Input validation (empty or whitespace-only text)
/// - Provider operations (network, quota, invalid-language conditions)
/// - History operations (appending invalid records)
/// - Cache operations (initialization, writing)
/// - Configuration operations (loading, validation)
///
/// All variants own their payloads as strings so the error is `Clone`;
/// the cache layer hands back shared errors (`Arc<Error>`) from coalesced
/// loads and callers need an owned copy.
#[derive(Error, Debug, Clone)]
pub enum Error {
    // ==========================================================================
    // Input Errors
    // ==========================================================================
    /// Text was empty or whitespace-only after cleaning
    #[error("empty text provided")]
    EmptyInput,

    // ==========================================================================
    // Provider Errors
    // ==========================================================================
    /// The translation provider failed (network, quota, invalid language, ...)
    #[error("translation provider error: {0}")]
    Provider(String),

    // ==========================================================================
    // History Errors
    // ==========================================================================
    /// A history record was rejected (caller bug: empty source or translation)
    #[error("invalid history record: {0}")]
    InvalidRecord(String),

    // ==========================================================================
    // Cache Errors
    // ==========================================================================
    /// Failed to initialize the cache
    #[error("failed to initialize cache: {0}")]
    CacheInit(String),

    /// Failed to write to cache
    #[error("failed to write to cache: {0}")]
    CacheWrite(String),

    // ==========================================================================
    // Configuration Errors
    // ==========================================================================
    /// Failed to load configuration file
    #[error("failed to load config: {0}")]
    ConfigLoad(String),

    /// Invalid configuration value
    #[error("invalid config value for '{field}': {reason}")]
    ConfigInvalid { field: String, reason: String },
}

/// Error classification matching the caller-facing taxonomy.
///
/// `BatchTranslator` stamps per-item failures with a kind, and the web
/// layer maps kinds to HTTP status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Recoverable by the caller: fix the input
    EmptyInput,
    /// Transient/external: recoverable by retry, never cached
    Provider,
    /// Caller bug: history misuse
    InvalidRecord,
    /// Configuration or store setup problem
    Internal,
}

impl Error {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyInput => ErrorKind::EmptyInput,
            Self::Provider(_) => ErrorKind::Provider,
            Self::InvalidRecord(_) => ErrorKind::InvalidRecord,
            Self::CacheInit(_)
            | Self::CacheWrite(_)
            | Self::ConfigLoad(_)
            | Self::ConfigInvalid { .. } => ErrorKind::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(Error::EmptyInput.kind(), ErrorKind::EmptyInput);
        assert_eq!(Error::Provider("boom".into()).kind(), ErrorKind::Provider);
        assert_eq!(
            Error::InvalidRecord("empty source".into()).kind(),
            ErrorKind::InvalidRecord
        );
        assert_eq!(Error::CacheInit("locked".into()).kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_error_display_carries_provider_message() {
        let err = Error::Provider("HTTP 429: too many requests".into());
        assert!(err.to_string().contains("HTTP 429"));
    }
}
