use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Language codes following ISO 639-1
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lang(pub String);

impl Lang {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Serde default functions for the default language pair
fn default_source_lang() -> Lang {
    Lang::new(DEFAULT_SOURCE_LANG)
}

fn default_target_lang() -> Lang {
    Lang::new(DEFAULT_TARGET_LANG)
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Lang {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Lang {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Provider backend configuration for OpenAI-compatible APIs.
///
/// Supports llama.cpp, Ollama, DeepSeek, OpenAI, and any other OpenAI-compatible API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_base: String,
    pub api_key: Option<String>,
    pub model: String,
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl ProviderConfig {
    /// Create a new provider config
    pub fn new(
        api_base: impl Into<String>,
        api_key: Option<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            api_base: api_base.into(),
            api_key,
            model: model.into(),
            retry_count: default_retry_count(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

const fn default_retry_count() -> u32 {
    3
}

const fn default_retry_delay_ms() -> u64 {
    1000
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:8080/v1".to_string(),
            api_key: None,
            model: "default_model".to_string(),
            retry_count: default_retry_count(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Enable memory cache
    #[serde(default = "default_true")]
    pub memory_enabled: bool,

    /// Maximum memory cache entries (None = unbounded)
    #[serde(default)]
    pub memory_max_entries: Option<u64>,

    /// Enable disk cache (persists translations across restarts)
    #[serde(default)]
    pub disk_enabled: bool,

    /// Disk cache directory (defaults to .cache/text-translator)
    pub disk_path: Option<PathBuf>,
}

const fn default_true() -> bool {
    true
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            memory_enabled: true,
            memory_max_entries: None,
            disk_enabled: false,
            disk_path: None,
        }
    }
}

/// Batch translation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Maximum in-flight provider requests during a batch (1 = sequential)
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
}

const fn default_max_concurrent() -> usize {
    4
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_concurrent: default_max_concurrent(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Source language
    #[serde(default = "default_source_lang")]
    pub source_lang: Lang,

    /// Target language
    #[serde(default = "default_target_lang")]
    pub target_lang: Lang,

    /// In paragraph mode, pass failed lines through untranslated instead of
    /// failing the whole call
    #[serde(default)]
    pub skip_failed_lines: bool,

    /// Maximum accepted input length in characters (None = unlimited;
    /// file/web collaborators enforce their own byte ceilings)
    #[serde(default)]
    pub max_input_chars: Option<usize>,

    /// Provider backend configuration
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Cache configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Batch configuration
    #[serde(default)]
    pub batch: BatchConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source_lang: default_source_lang(),
            target_lang: default_target_lang(),
            skip_failed_lines: false,
            max_input_chars: None,
            provider: ProviderConfig::default(),
            cache: CacheConfig::default(),
            batch: BatchConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, crate::error::Error> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            crate::error::Error::ConfigLoad(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        toml::from_str(&content).map_err(|e| {
            crate::error::Error::ConfigLoad(format!("Failed to parse config: {e}"))
        })
    }

    /// Load from default locations (~/.config/text-translator/config.toml, ./config.toml)
    pub fn load() -> Self {
        // Try user config
        if let Some(config_dir) = crate::util::config_dir() {
            let user_config = config_dir.join("text-translator").join("config.toml");
            if user_config.exists() {
                match Self::from_file(&user_config) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {}", user_config.display());
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // Try local config
        let local_config = std::path::PathBuf::from("config.toml");
        if local_config.exists() {
            match Self::from_file(&local_config) {
                Ok(config) => {
                    tracing::debug!("Loaded config from ./config.toml");
                    return config;
                }
                Err(e) => {
                    tracing::warn!("Failed to load ./config.toml: {}", e);
                }
            }
        }

        // Return defaults
        tracing::debug!("No config file found, using defaults");
        Self::default()
    }
}

/// A language option for UI dropdowns and prompt building
#[derive(Debug, Clone)]
pub struct LanguageOption {
    /// ISO language code (e.g., "en", "kn")
    pub code: &'static str,
    /// Display name (e.g., "English", "Kannada")
    pub name: &'static str,
}

/// Languages this tool knows display names for.
///
/// The provider accepts arbitrary ISO codes; this table only drives
/// prompts and display labels.
pub fn language_options() -> Vec<LanguageOption> {
    vec![
        LanguageOption { code: "en", name: "English" },
        LanguageOption { code: "kn", name: "Kannada" },
        LanguageOption { code: "hi", name: "Hindi" },
        LanguageOption { code: "te", name: "Telugu" },
        LanguageOption { code: "ml", name: "Malayalam" },
        LanguageOption { code: "ta", name: "Tamil" },
        LanguageOption { code: "mr", name: "Marathi" },
        LanguageOption { code: "gu", name: "Gujarati" },
        LanguageOption { code: "bn", name: "Bengali" },
        LanguageOption { code: "pa", name: "Punjabi" },
        LanguageOption { code: "ur", name: "Urdu" },
    ]
}

/// Get the display name for a language code, if known.
pub fn language_name(code: &str) -> Option<&'static str> {
    language_options()
        .into_iter()
        .find(|opt| opt.code == code)
        .map(|opt| opt.name)
}

/// Check whether a language code is in the known table.
pub fn is_supported_language(code: &str) -> bool {
    language_name(code).is_some()
}

/// Default source language code
pub const DEFAULT_SOURCE_LANG: &str = "en";
/// Default target language code
pub const DEFAULT_TARGET_LANG: &str = "kn";
