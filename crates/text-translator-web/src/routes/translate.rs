//! JSON translation routes - single and batch.

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

use super::{BatchRequest, TranslateRequest};
use crate::helpers::ApiResult;
use crate::state::AppState;

/// `POST /api/translate` - translate one text.
///
/// Request `{"text": ...}`; response `{"text": ..., "translated": ...}`.
/// Empty input -> 400, provider failure -> 502, both with an error body.
pub async fn api_translate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TranslateRequest>,
) -> ApiResult<Json<Value>> {
    debug!("api_translate: {} chars", request.text.len());

    let translated = state.manager().translate(&request.text).await?;

    Ok(Json(json!({
        "text": request.text,
        "translated": translated,
    })))
}

/// `POST /api/batch` - translate an ordered list of texts.
///
/// One result entry per input, in input order; per-item failures are
/// reported in place and never abort the batch.
pub async fn api_batch(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BatchRequest>,
) -> ApiResult<Json<Value>> {
    debug!("api_batch: {} items", request.texts.len());

    let items = text_translator_core::BatchTranslator::new(state.manager())
        .translate_list(&request.texts)
        .await;

    Ok(Json(json!({ "items": items })))
}
