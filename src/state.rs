use std::sync::Arc;

use crate::storage::Storage;

/// Shared handler state. The store is chosen and owned by the entry point.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }
}
