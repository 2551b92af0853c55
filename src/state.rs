//! Shared application state.

use crate::config::Settings;

/// Shared application state accessible to all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Finalized launch settings (workspace and credentials)
    pub settings: Settings,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        AppState { settings }
    }
}
