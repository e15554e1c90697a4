//! Askama templates for the web UI.
//!
//! One full-page template: the translation form, rendered result or error,
//! and the most recent history entries. The JSON API lives in `routes` and
//! does not use templates.

use askama::Template;
use askama_web::WebTemplate;
use text_translator_core::{language_name, HistoryRecord};

/// Main page: translation form plus result/error panels.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    /// Text the user submitted (re-rendered into the form)
    pub source_text: String,
    pub translated: Option<String>,
    pub error: Option<String>,
    /// Most recent translations, newest first
    pub recent: Vec<HistoryRecord>,
    /// Display name of the target language (falls back to the raw code)
    pub target_lang: String,
}

impl IndexTemplate {
    /// Empty form (initial GET).
    pub fn empty(target_code: &str) -> Self {
        Self {
            source_text: String::new(),
            translated: None,
            error: None,
            recent: Vec::new(),
            target_lang: language_name(target_code)
                .map_or_else(|| target_code.to_string(), String::from),
        }
    }

    pub fn with_result(mut self, source_text: String, translated: String) -> Self {
        self.source_text = source_text;
        self.translated = Some(translated);
        self
    }

    pub fn with_error(mut self, source_text: String, error: String) -> Self {
        self.source_text = source_text;
        self.error = Some(error);
        self
    }

    pub fn with_recent(mut self, recent: Vec<HistoryRecord>) -> Self {
        self.recent = recent;
        self
    }
}
