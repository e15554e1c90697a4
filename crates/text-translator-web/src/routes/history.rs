//! History route - recent completed translations.

use axum::extract::{Query, State};
use axum::Json;
use serde_json::{json, Value};
use std::sync::Arc;

use super::HistoryQuery;
use crate::state::AppState;

const DEFAULT_LIMIT: usize = 10;

/// `GET /api/history?limit=n` - most recent translations, newest first.
pub async fn get_history(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> Json<Value> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    let records = state.history().get_recent(limit);

    Json(json!({ "records": records }))
}
