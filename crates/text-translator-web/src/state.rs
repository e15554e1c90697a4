use anyhow::Result;
use std::sync::Arc;
use text_translator_core::{AppConfig, TranslationHistory, TranslationManager};

/// Recent translations kept for the web UI and /api/history
const HISTORY_CAPACITY: usize = 100;

/// Global application state.
///
/// One process-wide manager and history, built at startup and shared across
/// requests. The core never requires this shape; it is this deployment's
/// choice.
pub struct AppState {
    manager: TranslationManager,
    history: Arc<TranslationHistory>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        let history = Arc::new(TranslationHistory::with_capacity(HISTORY_CAPACITY));
        let manager = TranslationManager::new(config)
            .map_err(|e| anyhow::anyhow!("Failed to create translator: {e}"))?
            .with_history(Arc::clone(&history));

        Ok(Self { manager, history })
    }

    pub const fn manager(&self) -> &TranslationManager {
        &self.manager
    }

    pub fn history(&self) -> &TranslationHistory {
        &self.history
    }
}
