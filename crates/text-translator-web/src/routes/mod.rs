//! HTTP route handlers for the text translator web application.
//!
//! `/` serves HTML via Askama templates; everything under `/api` speaks
//! JSON. Errors always carry the kind and message, never a blank result.

mod history;
mod pages;
mod translate;

pub use history::get_history;
pub use pages::{index, translate_form};
pub use translate::{api_batch, api_translate};

use serde::Deserialize;

/// JSON body for `POST /api/translate`.
#[derive(Deserialize)]
pub struct TranslateRequest {
    pub text: String,
}

/// JSON body for `POST /api/batch`.
#[derive(Deserialize)]
pub struct BatchRequest {
    pub texts: Vec<String>,
}

/// Form data for the `/` translation form.
#[derive(Deserialize, Default)]
pub struct TranslateForm {
    #[serde(default)]
    pub text: String,
}

/// Query params for `GET /api/history`.
#[derive(Deserialize, Default)]
pub struct HistoryQuery {
    /// Number of records to return (default 10)
    #[serde(default)]
    pub limit: Option<usize>,
}
