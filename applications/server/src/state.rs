/// Shared application state
use crate::services::LibraryService;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub library: Arc<LibraryService>,
}

impl AppState {
    pub fn new(library: Arc<LibraryService>) -> Self {
        Self { library }
    }
}
