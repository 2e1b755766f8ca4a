use crate::config::Config;
use crate::storage::Storage;
use axum::extract::FromRef;
use std::sync::Arc;

/// Shared application state. The storage adapter is chosen once at startup
/// and never swapped afterwards.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub config: Config,
}

impl FromRef<AppState> for Arc<dyn Storage> {
    fn from_ref(state: &AppState) -> Self {
        state.storage.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
