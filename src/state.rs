//! Shared application state for all routes.

use crate::session::SessionSource;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<dyn SessionSource>,
}

impl AppState {
    pub fn new(sessions: impl SessionSource + 'static) -> Self {
        AppState {
            sessions: Arc::new(sessions),
        }
    }
}
