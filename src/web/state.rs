use std::sync::Arc;

use crate::config::Config;
use crate::core::StatusEngine;
use crate::db::RecordStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the store and config sit behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Record persistence.
    pub store: Arc<dyn RecordStore>,
    /// Loaded configuration (responsibles, note limit, timeouts).
    pub config: Arc<Config>,
    pub engine: StatusEngine,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, config: Config) -> Self {
        let engine = StatusEngine::with_pending_window(config.pending_after_days);
        Self {
            store,
            config: Arc::new(config),
            engine,
        }
    }
}
