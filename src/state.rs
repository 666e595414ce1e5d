//! Shared application state for all routes.

use crate::store::Repository;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// The only resource shared between requests.
    pub repo: Arc<dyn Repository>,
}

impl AppState {
    pub fn new(repo: impl Repository + 'static) -> Self {
        Self {
            repo: Arc::new(repo),
        }
    }
}
