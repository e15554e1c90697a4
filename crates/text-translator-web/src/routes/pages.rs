//! Page routes - the HTML translation form.

use axum::extract::{Form, State};
use std::sync::Arc;
use tracing::error;

use super::TranslateForm;
use crate::state::AppState;
use crate::templates::IndexTemplate;

/// How many history entries the page shows
const RECENT_ON_PAGE: usize = 10;

fn page_base(state: &AppState) -> IndexTemplate {
    IndexTemplate::empty(state.manager().config().target_lang.as_str())
        .with_recent(state.history().get_recent(RECENT_ON_PAGE))
}

/// Landing page with the translation form.
pub async fn index(State(state): State<Arc<AppState>>) -> IndexTemplate {
    page_base(&state)
}

/// Form submission: translate and re-render the page.
///
/// Multiline input keeps its paragraph structure; single lines go straight
/// through. Errors render inline - never as a blank translation.
pub async fn translate_form(
    State(state): State<Arc<AppState>>,
    Form(form): Form<TranslateForm>,
) -> IndexTemplate {
    let source_text = form.text;
    if source_text.trim().is_empty() {
        return page_base(&state)
            .with_error(source_text, "Please enter text to translate.".to_string());
    }

    let manager = state.manager();
    let result = if source_text.trim().contains('\n') {
        manager.translate_paragraph(&source_text).await
    } else {
        manager.translate(&source_text).await
    };

    // History may have grown; re-read it after the translation
    match result {
        Ok(translated) => page_base(&state).with_result(source_text, translated),
        Err(e) => {
            error!("Translation failed: {}", e);
            page_base(&state).with_error(source_text, format!("Translation error: {e}"))
        }
    }
}
