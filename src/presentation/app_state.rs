// Application state for the demo backend handlers
use crate::infrastructure::reading_store::ReadingStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ReadingStore>,
}

impl AppState {
    pub fn new(store: Arc<ReadingStore>) -> Self {
        Self { store }
    }
}
